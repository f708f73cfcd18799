//! The dashboard's page set.

pub mod business;
pub mod dashboard;
pub mod explainability;
pub mod risk;
pub mod settings;
pub mod trends;

use crate::core::context::AppContext;
use crate::core::router::{Disposer, Markup, Routable};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Business,
    Risk,
    Trends,
    Explainability,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Business,
        Page::Risk,
        Page::Trends,
        Page::Explainability,
        Page::Settings,
    ];

    /// Sidebar label; differs from the title only where the title is long.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Business => "Business",
            Page::Risk => "Risk Analysis",
            Page::Trends => "Trends",
            Page::Explainability => "Explainability",
            Page::Settings => "Settings",
        }
    }
}

/// `(key, label)` pairs for building the sidebar.
pub fn nav_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    Page::ALL.into_iter().map(|p| (p.key(), p.label()))
}

impl Routable for Page {
    const DEFAULT: Self = Page::Dashboard;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Business => "business",
            Page::Risk => "risk",
            Page::Trends => "trends",
            Page::Explainability => "explainability",
            Page::Settings => "settings",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Overview",
            Page::Business => "Analysis",
            Page::Risk => "Risk",
            Page::Trends => "Trends",
            Page::Explainability => "Explainability",
            Page::Settings => "Settings",
        }
    }

    fn render(&self, ctx: &AppContext) -> Result<Markup> {
        let markup = match self {
            Page::Dashboard => dashboard::render(ctx),
            Page::Business => business::render(),
            Page::Risk => risk::render(),
            Page::Trends => trends::render(),
            Page::Explainability => explainability::render(),
            Page::Settings => settings::render(ctx),
        };
        Ok(Markup::Ready(markup))
    }

    fn init(&self, ctx: &AppContext) -> Result<Disposer> {
        match self {
            Page::Dashboard => dashboard::init(ctx),
            Page::Business => business::init(ctx),
            Page::Risk => risk::init(ctx),
            Page::Trends => trends::init(ctx),
            Page::Explainability | Page::Settings => Ok(Disposer::none()),
        }
    }

    fn has_panel(&self) -> bool {
        !matches!(self, Page::Settings)
    }

    fn render_panel(&self, ctx: &AppContext) -> Result<Markup> {
        let today = chrono::Local::now().date_naive();
        Ok(Markup::Ready(dashboard::render_panel(ctx, today)))
    }
}
