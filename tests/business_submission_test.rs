use anyhow::Result;
use async_trait::async_trait;
use credlens::app::pages::business::{
    BUSY_CLASS, FAILURE_ALERT, FORM_ID, PAYMENT_DELAY, RESULT_ID, REVENUE, SUBMIT_ID,
};
use credlens::{
    nav_entries, AppContext, DashboardConfig, Document, HttpScoreService, MetricInput, Page,
    RiskLevel, Router, ScoreResult, ScoreService,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn config_for(base_url: &str) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.service.base_url = base_url.to_string();
    config
}

async fn business_page(base_url: &str) -> Result<Router<Page>> {
    let config = config_for(base_url);
    let service = HttpScoreService::new(&config)?;
    let ctx = AppContext::new(Document::new(nav_entries()), Arc::new(service), config);
    let router = Router::new(ctx);
    assert!(router.navigate("business").await.is_rendered());
    Ok(router)
}

#[tokio::test]
async fn test_submission_posts_form_values_once() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/analyze")
            .header("content-type", "application/json")
            .json_body(json!({
                "revenue": 45000,
                "transactions": 1200,
                "paymentDelay": 8,
                "activityFreq": 22
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"score": 78, "grade": "B+", "risk": "Low"}));
    });

    let router = business_page(&server.base_url()).await?;
    let ctx = router.context();

    assert_eq!(ctx.dispatch(FORM_ID, "submit").await, 1);

    api_mock.assert();
    let doc = ctx.doc();
    let result = doc.fragment(RESULT_ID).expect("result card written");
    assert!(result.contains(r#"<div class="result-score">78</div>"#));
    assert!(result.contains("Grade B+"));
    assert!(result.contains(r#"badge-success">Low Risk"#));
    assert!(result.contains("Monthly revenue of $45,000"));
    assert!(!doc.has_class(SUBMIT_ID, BUSY_CLASS));
    assert!(doc.alerts().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_empty_revenue_is_sent_as_zero() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/analyze").json_body(json!({
            "revenue": 0,
            "transactions": 1200,
            "paymentDelay": 12.5,
            "activityFreq": 22
        }));
        then.status(200)
            .json_body(json!({"score": 41.5, "grade": "D", "risk": "High"}));
    });

    let router = business_page(&server.base_url()).await?;
    let ctx = router.context();
    {
        let mut doc = ctx.doc();
        doc.set_field(REVENUE, "");
        doc.set_field(PAYMENT_DELAY, "12.5 days");
    }

    ctx.dispatch(FORM_ID, "submit").await;

    api_mock.assert_hits(1);
    let doc = ctx.doc();
    let result = doc.fragment(RESULT_ID).expect("result card written");
    assert!(result.contains(r#"<div class="result-score">41.5</div>"#));
    assert!(result.contains(r#"badge-danger">High Risk"#));
    assert!(result.contains("indicates concerns."));

    Ok(())
}

#[tokio::test]
async fn test_server_error_raises_single_alert() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/analyze");
        then.status(500).body("model not loaded");
    });

    let router = business_page(&server.base_url()).await?;
    let ctx = router.context();

    ctx.dispatch(FORM_ID, "submit").await;

    api_mock.assert_hits(1);
    let doc = ctx.doc();
    assert_eq!(doc.alerts(), [FAILURE_ALERT.to_string()]);
    assert!(doc.fragment(RESULT_ID).is_none());
    assert!(doc.content().contains("Submit business metrics to"));
    assert!(!doc.has_class(SUBMIT_ID, BUSY_CLASS));

    Ok(())
}

#[tokio::test]
async fn test_failure_keeps_previous_result() -> Result<()> {
    let server = MockServer::start();
    let mut ok_mock = server.mock(|when, then| {
        when.method(POST).path("/api/analyze");
        then.status(200)
            .json_body(json!({"score": 78, "grade": "B+", "risk": "Low"}));
    });

    let router = business_page(&server.base_url()).await?;
    let ctx = router.context();

    ctx.dispatch(FORM_ID, "submit").await;
    ok_mock.assert_hits(1);
    let previous = ctx
        .doc()
        .fragment(RESULT_ID)
        .map(str::to_string)
        .expect("result card written");

    ok_mock.delete();
    let failing_mock = server.mock(|when, then| {
        when.method(POST).path("/api/analyze");
        then.status(502).body("upstream timeout");
    });

    ctx.dispatch(FORM_ID, "submit").await;

    failing_mock.assert_hits(1);
    let doc = ctx.doc();
    assert_eq!(doc.fragment(RESULT_ID), Some(previous.as_str()));
    assert_eq!(doc.alerts(), [FAILURE_ALERT.to_string()]);
    assert!(!doc.has_class(SUBMIT_ID, BUSY_CLASS));

    Ok(())
}

#[tokio::test]
async fn test_unparsable_response_raises_alert() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/analyze");
        then.status(200).body("<html>gateway</html>");
    });

    let router = business_page(&server.base_url()).await?;
    router.context().dispatch(FORM_ID, "submit").await;

    let doc = router.context().doc();
    assert_eq!(doc.alerts().len(), 1);
    assert!(doc.fragment(RESULT_ID).is_none());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_raises_alert() -> Result<()> {
    // nothing listens on port 1
    let router = business_page("http://127.0.0.1:1").await?;

    router.context().dispatch(FORM_ID, "submit").await;

    let doc = router.context().doc();
    assert_eq!(doc.alerts(), [FAILURE_ALERT.to_string()]);
    assert!(!doc.has_class(SUBMIT_ID, BUSY_CLASS));

    Ok(())
}

#[tokio::test]
async fn test_listener_removed_after_leaving_page() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/analyze");
        then.status(200)
            .json_body(json!({"score": 78, "grade": "B+", "risk": "Low"}));
    });

    let router = business_page(&server.base_url()).await?;
    router.navigate("risk").await;

    assert_eq!(router.context().dispatch(FORM_ID, "submit").await, 0);
    api_mock.assert_hits(0);
    assert_eq!(router.context().doc().listener_count(), 0);

    Ok(())
}

/// Answers after a delay so navigation can overtake the request.
struct SlowService;

#[async_trait]
impl ScoreService for SlowService {
    async fn compute_score(&self, _input: &MetricInput) -> credlens::Result<ScoreResult> {
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(ScoreResult {
            score: 78.0,
            grade: "B+".to_string(),
            risk: RiskLevel::Low,
            ml_risk_probability: None,
            factors: None,
        })
    }
}

#[tokio::test]
async fn test_late_result_after_navigation_is_dropped() {
    let ctx = AppContext::new(
        Document::new(nav_entries()),
        Arc::new(SlowService),
        DashboardConfig::default(),
    );
    let router: Router<Page> = Router::new(ctx.clone());
    router.navigate("business").await;

    let (handlers, outcome) = tokio::join!(ctx.dispatch(FORM_ID, "submit"), router.navigate("risk"));

    assert_eq!(handlers, 1);
    assert!(outcome.is_rendered());
    let doc = ctx.doc();
    assert!(doc.fragment(RESULT_ID).is_none());
    assert!(doc.alerts().is_empty());
    assert!(doc.content().contains("riskBarChart"));
}
