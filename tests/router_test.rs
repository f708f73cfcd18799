use async_trait::async_trait;
use credlens::app::pages::{business, dashboard, risk, trends};
use credlens::core::router::{Disposer, Markup};
use credlens::{
    nav_entries, AppContext, DashboardConfig, DashboardError, Document, MetricInput,
    NavigationOutcome, Page, Result, Routable, Router, ScoreResult, ScoreService,
};
use std::sync::Arc;
use std::time::Duration;

struct UnreachableService;

#[async_trait]
impl ScoreService for UnreachableService {
    async fn compute_score(&self, _input: &MetricInput) -> Result<ScoreResult> {
        Err(DashboardError::ServiceError {
            status: 503,
            message: "not wired in router tests".to_string(),
        })
    }
}

fn context<I, K, L>(nav: I) -> AppContext
where
    I: IntoIterator<Item = (K, L)>,
    K: Into<String>,
    L: Into<String>,
{
    AppContext::new(
        Document::new(nav),
        Arc::new(UnreachableService),
        DashboardConfig::default(),
    )
}

fn page_router() -> Router<Page> {
    Router::new(context(nav_entries()))
}

#[tokio::test]
async fn test_every_page_renders_and_highlights() -> Result<()> {
    let router = page_router();

    for page in Page::ALL {
        let outcome = router.navigate(page.key()).await;
        assert!(outcome.is_rendered(), "{} did not render", page.key());
        let expected = page.render(router.context())?.resolve().await?;

        let doc = router.context().doc();
        assert_eq!(doc.content(), expected);
        assert_eq!(doc.active_nav(), vec![page.key()]);
        assert_eq!(doc.panel_visible(), page.has_panel());
        assert_eq!(doc.title(), format!("{} · CredLens", page.title()));
        assert_eq!(doc.content_scroll_top(), 0);
        assert!(!doc.sidebar_open());
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_key_renders_default_page() {
    let router = page_router();

    router.navigate("dashboard").await;
    let expected = router.context().doc().content().to_string();

    router.navigate("risk").await;
    let outcome = router.navigate("reports").await;

    assert!(matches!(
        outcome,
        NavigationOutcome::Rendered { page: Page::Dashboard, init_error: None }
    ));
    let doc = router.context().doc();
    assert_eq!(doc.content(), expected);
    assert_eq!(doc.active_nav(), vec!["dashboard"]);
}

#[tokio::test]
async fn test_settings_hides_panel_until_next_page() {
    let router = page_router();

    router.on_hash_change("#settings").await;
    assert!(!router.context().doc().panel_visible());

    router.on_hash_change("#trends").await;
    let doc = router.context().doc();
    assert!(doc.panel_visible());
    assert!(doc.panel().contains("calendar"));
}

#[test]
fn test_page_from_hash() {
    assert_eq!(Router::<Page>::page_from_hash("#risk"), "risk");
    assert_eq!(Router::<Page>::page_from_hash("risk"), "risk");
    assert_eq!(Router::<Page>::page_from_hash("#"), "dashboard");
    assert_eq!(Router::<Page>::page_from_hash(""), "dashboard");
}

#[tokio::test]
async fn test_previous_page_released_before_next_render() {
    let router = page_router();

    router.navigate("dashboard").await;
    {
        let doc = router.context().doc();
        assert!(doc.chart(dashboard::BREAKDOWN_CHART_ID).is_some());
        assert_eq!(doc.running_animations(), 1);
    }

    router.navigate("trends").await;
    {
        let doc = router.context().doc();
        assert!(doc.chart(dashboard::BREAKDOWN_CHART_ID).is_none());
        assert_eq!(doc.running_animations(), 0);
        assert!(doc.chart(trends::REPUTATION_CHART_ID).is_some());
        assert!(doc.chart(trends::VOLATILITY_CHART_ID).is_some());
    }

    router.navigate("business").await;
    {
        let doc = router.context().doc();
        assert_eq!(doc.chart_count(), 0);
        assert_eq!(doc.listener_count(), 1);
    }

    router.navigate("risk").await;
    let doc = router.context().doc();
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(doc.chart_count(), 1);
    assert!(doc.chart(risk::RISK_CHART_ID).is_some());
}

#[tokio::test]
async fn test_revisiting_page_does_not_stack_listeners() {
    let router = page_router();

    router.navigate("business").await;
    router.navigate("business").await;
    router.on_hash_change("#business").await;

    assert_eq!(router.context().doc().listener_count(), 1);
    assert_eq!(router.context().dispatch(business::FORM_ID, "submit").await, 1);
}

// A page set exercising the failure and async paths.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Probe {
    Home,
    HalfWired,
    Broken,
    Slow,
    SlowBroken,
    PanelBroken,
    SlowPanel,
}

impl Routable for Probe {
    const DEFAULT: Self = Probe::Home;

    fn all() -> &'static [Self] {
        &[
            Probe::Home,
            Probe::HalfWired,
            Probe::Broken,
            Probe::Slow,
            Probe::SlowBroken,
            Probe::PanelBroken,
            Probe::SlowPanel,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Probe::Home => "home",
            Probe::HalfWired => "half",
            Probe::Broken => "broken",
            Probe::Slow => "slow",
            Probe::SlowBroken => "slow-broken",
            Probe::PanelBroken => "panel-broken",
            Probe::SlowPanel => "slow-panel",
        }
    }

    fn title(&self) -> &'static str {
        "Probe"
    }

    fn render(&self, _ctx: &AppContext) -> Result<Markup> {
        match self {
            Probe::Home => Ok(Markup::ready("<p>home</p>")),
            Probe::HalfWired => Ok(Markup::ready("<p>half</p>")),
            Probe::PanelBroken => Ok(Markup::ready("<p>panel-broken</p>")),
            Probe::SlowPanel => Ok(Markup::ready("<p>slow-panel</p>")),
            Probe::Broken => Err(DashboardError::RenderError {
                page: "broken".to_string(),
                message: "template <missing>".to_string(),
            }),
            Probe::Slow => Ok(Markup::deferred(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok("<p>slow</p>".to_string())
            })),
            Probe::SlowBroken => Ok(Markup::deferred(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Err(DashboardError::RenderError {
                    page: "slow-broken".to_string(),
                    message: "late failure".to_string(),
                })
            })),
        }
    }

    fn init(&self, _ctx: &AppContext) -> Result<Disposer> {
        match self {
            Probe::HalfWired => Err(DashboardError::InitError {
                page: "half".to_string(),
                message: "canvas missing".to_string(),
            }),
            _ => Ok(Disposer::none()),
        }
    }

    fn has_panel(&self) -> bool {
        matches!(
            self,
            Probe::Home | Probe::Slow | Probe::PanelBroken | Probe::SlowPanel
        )
    }

    fn render_panel(&self, _ctx: &AppContext) -> Result<Markup> {
        match self {
            Probe::PanelBroken => Ok(Markup::deferred(async {
                Err(DashboardError::RenderError {
                    page: "panel-broken".to_string(),
                    message: "calendar feed down".to_string(),
                })
            })),
            Probe::SlowPanel => Ok(Markup::deferred(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok("<p>panel for slow-panel</p>".to_string())
            })),
            other => Ok(Markup::ready(format!("<p>panel for {}</p>", other.key()))),
        }
    }
}

fn probe_router() -> Router<Probe> {
    Router::new(context(Probe::all().iter().map(|p| (p.key(), p.key()))))
}

#[tokio::test]
async fn test_init_failure_keeps_rendered_content() {
    let router = probe_router();

    let outcome = router.navigate("half").await;

    match outcome {
        NavigationOutcome::Rendered { page, init_error } => {
            assert_eq!(page, Probe::HalfWired);
            assert!(matches!(init_error, Some(DashboardError::InitError { .. })));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let doc = router.context().doc();
    assert_eq!(doc.content(), "<p>half</p>");
    assert_eq!(doc.active_nav(), vec!["half"]);
    assert!(!doc.panel_visible());
}

#[tokio::test]
async fn test_render_failure_shows_error_block() {
    let router = probe_router();
    router.navigate("home").await;

    let outcome = router.navigate("broken").await;

    assert!(matches!(outcome, NavigationOutcome::Failed { page: Probe::Broken, .. }));
    let doc = router.context().doc();
    assert!(doc.content().contains(r#"<div class="error-block">"#));
    assert!(doc.content().contains("Error loading page: broken"));
    assert!(doc.content().contains("template &lt;missing&gt;"));
    assert!(doc.content().contains(r#"<pre class="error-trace">"#));
    // highlight only moves on success
    assert_eq!(doc.active_nav(), vec!["home"]);

    drop(doc);
    assert!(router.navigate("home").await.is_rendered());
    assert_eq!(router.context().doc().content(), "<p>home</p>");
}

#[tokio::test]
async fn test_superseded_render_is_discarded() {
    let router = probe_router();

    let (slow, fast) = tokio::join!(router.navigate("slow"), router.navigate("half"));

    assert!(matches!(slow, NavigationOutcome::Superseded { page: Probe::Slow }));
    assert!(fast.is_rendered());
    let doc = router.context().doc();
    assert_eq!(doc.content(), "<p>half</p>");
    assert_eq!(doc.active_nav(), vec!["half"]);
    assert!(!doc.panel_visible());
}

#[tokio::test]
async fn test_superseded_failure_is_discarded() {
    let router = probe_router();

    let (late, current) = tokio::join!(router.navigate("slow-broken"), router.navigate("home"));

    assert!(matches!(late, NavigationOutcome::Superseded { page: Probe::SlowBroken }));
    assert!(current.is_rendered());
    let doc = router.context().doc();
    assert_eq!(doc.content(), "<p>home</p>");
    assert!(!doc.content().contains("error-block"));
}

#[tokio::test]
async fn test_deferred_render_settles_when_alone() {
    let router = probe_router();

    let outcome = router.on_hash_change("#slow").await;

    assert!(outcome.is_rendered());
    let doc = router.context().doc();
    assert_eq!(doc.content(), "<p>slow</p>");
    assert_eq!(doc.panel(), "<p>panel for slow</p>");
    assert_eq!(doc.title(), "Probe · CredLens");
}

#[tokio::test]
async fn test_panel_failure_shows_error_block() {
    let router = probe_router();
    router.navigate("home").await;

    let outcome = router.navigate("panel-broken").await;

    assert!(matches!(outcome, NavigationOutcome::Failed { page: Probe::PanelBroken, .. }));
    let doc = router.context().doc();
    assert!(doc.content().contains(r#"<div class="error-block">"#));
    assert!(doc.content().contains("Error loading page: panel-broken"));
    assert!(doc.content().contains("calendar feed down"));
    assert_eq!(doc.active_nav(), vec!["home"]);
}

#[tokio::test]
async fn test_superseded_panel_is_discarded() {
    let router = probe_router();

    let (late, current) = tokio::join!(router.navigate("slow-panel"), router.navigate("home"));

    assert!(matches!(late, NavigationOutcome::Superseded { page: Probe::SlowPanel }));
    assert!(current.is_rendered());
    let doc = router.context().doc();
    assert_eq!(doc.content(), "<p>home</p>");
    assert_eq!(doc.panel(), "<p>panel for home</p>");
    assert_eq!(doc.active_nav(), vec!["home"]);
}
