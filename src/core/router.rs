//! Fragment-driven navigation with a render → init → panel → highlight
//! lifecycle per page.
//!
//! Each call to [`Router::navigate`] takes a fresh sequence token. Whenever a
//! step suspends on deferred markup, the result is thrown away on resume if a
//! newer navigation has started in the meantime. Failures are contained
//! inside `navigate`: init errors are logged and tolerated, everything else
//! replaces the main region with an error block.

use crate::core::context::AppContext;
use crate::core::document::Document;
use crate::utils::error::{DashboardError, Result};
use crate::utils::html::esc;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Output of a page's render or panel producer.
pub enum Markup {
    Ready(String),
    Deferred(BoxFuture<'static, Result<String>>),
}

impl Markup {
    pub fn ready(markup: impl Into<String>) -> Self {
        Markup::Ready(markup.into())
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<String>> + Send + 'static,
    {
        Markup::Deferred(future.boxed())
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Markup::Deferred(_))
    }

    pub async fn resolve(self) -> Result<String> {
        match self {
            Markup::Ready(markup) => Ok(markup),
            Markup::Deferred(future) => future.await,
        }
    }
}

impl From<String> for Markup {
    fn from(markup: String) -> Self {
        Markup::Ready(markup)
    }
}

/// Releases whatever a page's init acquired (listeners, charts, animations).
#[derive(Default)]
pub struct Disposer(Option<Box<dyn FnOnce(&mut Document) + Send>>);

impl Disposer {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce(&mut Document) + Send + 'static,
    {
        Self(Some(Box::new(release)))
    }

    pub fn dispose(self, doc: &mut Document) {
        if let Some(release) = self.0 {
            release(doc);
        }
    }
}

/// A closed set of navigable pages.
pub trait Routable: Copy + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Where unknown keys and empty fragments land.
    const DEFAULT: Self;

    fn all() -> &'static [Self];

    fn key(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }

    fn render(&self, ctx: &AppContext) -> Result<Markup>;

    fn init(&self, _ctx: &AppContext) -> Result<Disposer> {
        Ok(Disposer::none())
    }

    fn has_panel(&self) -> bool {
        false
    }

    fn render_panel(&self, _ctx: &AppContext) -> Result<Markup> {
        Ok(Markup::ready(""))
    }
}

#[derive(Debug)]
pub enum NavigationOutcome<P> {
    /// Content is on screen; `init_error` is set when wiring failed.
    Rendered {
        page: P,
        init_error: Option<DashboardError>,
    },
    /// The error block is on screen instead of the page.
    Failed { page: P, error: DashboardError },
    /// A newer navigation started while this one was suspended.
    Superseded { page: P },
}

impl<P> NavigationOutcome<P> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, NavigationOutcome::Rendered { .. })
    }
}

enum Settled {
    Done(Option<DashboardError>),
    Stale,
}

pub struct Router<P: Routable> {
    ctx: AppContext,
    seq: AtomicU64,
    active: Mutex<Option<(P, Disposer)>>,
}

impl<P: Routable> Router<P> {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            seq: AtomicU64::new(0),
            active: Mutex::new(None),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// The page whose init most recently completed.
    pub fn active_page(&self) -> Option<P> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|(page, _)| *page)
    }

    /// `"#risk"` -> `"risk"`; an empty fragment maps to the default page.
    pub fn page_from_hash(hash: &str) -> &str {
        let key = hash.strip_prefix('#').unwrap_or(hash);
        if key.is_empty() {
            P::DEFAULT.key()
        } else {
            key
        }
    }

    pub async fn on_hash_change(&self, hash: &str) -> NavigationOutcome<P> {
        self.navigate(Self::page_from_hash(hash)).await
    }

    pub async fn navigate(&self, key: &str) -> NavigationOutcome<P> {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let page = match P::from_key(key) {
            Some(page) => page,
            None => {
                tracing::debug!("Unknown page '{}', redirecting to '{}'", key, P::DEFAULT.key());
                P::DEFAULT
            }
        };
        tracing::debug!("Navigating to '{}' (#{})", page.key(), token);

        self.release_active();

        match self.run(page, token).await {
            Ok(Settled::Done(init_error)) => {
                tracing::debug!("Navigation to '{}' settled (#{})", page.key(), token);
                NavigationOutcome::Rendered { page, init_error }
            }
            Ok(Settled::Stale) => {
                tracing::debug!("Navigation to '{}' superseded (#{})", page.key(), token);
                NavigationOutcome::Superseded { page }
            }
            Err(error) => {
                if self.is_stale(token) {
                    tracing::debug!("Discarding failure of superseded navigation to '{}'", page.key());
                    return NavigationOutcome::Superseded { page };
                }
                tracing::error!("Navigation error for '{}': {}", page.key(), error.trace());
                self.ctx.doc().set_content(error_block(page.key(), &error));
                NavigationOutcome::Failed { page, error }
            }
        }
    }

    async fn run(&self, page: P, token: u64) -> Result<Settled> {
        let markup = page.render(&self.ctx)?.resolve().await?;
        if self.is_stale(token) {
            return Ok(Settled::Stale);
        }
        self.ctx.doc().set_content(markup);

        let init_error = match page.init(&self.ctx) {
            Ok(disposer) => {
                self.install(page, disposer);
                None
            }
            Err(error) => {
                tracing::warn!("Init failed for '{}': {}", page.key(), error);
                Some(error)
            }
        };

        if page.has_panel() {
            self.ctx.doc().show_panel();
            let panel = page.render_panel(&self.ctx)?.resolve().await?;
            if self.is_stale(token) {
                return Ok(Settled::Stale);
            }
            self.ctx.doc().set_panel(panel);
        } else {
            self.ctx.doc().hide_panel();
        }

        let title = format!("{} · {}", page.title(), self.ctx.config().ui.app_name);
        let mut doc = self.ctx.doc();
        doc.highlight_nav(page.key());
        doc.set_title(title);
        doc.close_sidebar();
        doc.scroll_content_to(0);

        Ok(Settled::Done(init_error))
    }

    fn is_stale(&self, token: u64) -> bool {
        self.seq.load(Ordering::SeqCst) != token
    }

    fn install(&self, page: P, disposer: Disposer) {
        let previous = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace((page, disposer));
        if let Some((_, stale)) = previous {
            stale.dispose(&mut self.ctx.doc());
        }
    }

    fn release_active(&self) {
        let previous = self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some((page, disposer)) = previous {
            tracing::debug!("Releasing '{}'", page.key());
            disposer.dispose(&mut self.ctx.doc());
        }
    }
}

fn error_block(key: &str, error: &DashboardError) -> String {
    format!(
        concat!(
            "<div class=\"error-block\">",
            "<h2>Error loading page: {key}</h2>",
            "<p class=\"error-message\">{message}</p>",
            "<pre class=\"error-trace\">{trace}</pre>",
            "</div>"
        ),
        key = esc(key),
        message = esc(&error.to_string()),
        trace = esc(&error.trace()),
    )
}
