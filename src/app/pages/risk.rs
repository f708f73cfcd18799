use crate::charts::color::Color;
use crate::charts::{self, theme};
use crate::core::context::AppContext;
use crate::core::router::Disposer;
use crate::domain::model::RiskLevel;
use crate::utils::error::Result;
use std::fmt::Write as _;

pub const RISK_CHART_ID: &str = "riskBarChart";

struct RiskFactor {
    name: &'static str,
    weight: u32,
    score: u32,
    color: Color,
    risk: &'static str,
}

const RISK_FACTORS: [RiskFactor; 4] = [
    RiskFactor { name: "Financial Stability", weight: 40, score: 82, color: theme::ACCENT, risk: "Low" },
    RiskFactor { name: "Sentiment Analysis", weight: 30, score: 74, color: theme::INFO, risk: "Moderate" },
    RiskFactor { name: "Behavioral Consistency", weight: 20, score: 88, color: theme::PURPLE, risk: "Low" },
    RiskFactor { name: "Activity Reliability", weight: 10, score: 69, color: theme::WARNING, risk: "Moderate" },
];

fn risk_badge(risk: &RiskLevel) -> String {
    format!(r#"<span class="badge badge-{}">{}</span>"#, risk.badge_class(), risk)
}

pub fn render() -> String {
    let mut out = format!(
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Risk Breakdown</h1>
      <p>Factor contribution weights and individual risk levels</p>
    </div>
  </div>
  <div class="card">
    <div class="card-header"><span class="card-title-lg">Contribution Weights</span></div>
    <div class="chart-container"><canvas id="{}"></canvas></div>
  </div>
  <div class="grid-2">"#,
        RISK_CHART_ID
    );

    for factor in &RISK_FACTORS {
        let _ = write!(
            out,
            r#"
    <div class="card">
      <div class="card-header"><span class="card-title-lg">{name}</span>{badge}</div>
      <div class="risk-figures">
        <span class="metric-score">{score}<span class="metric-max">/100</span></span>
        <div class="risk-weight"><div class="risk-weight-label">Weight</div><div class="risk-weight-value" style="color: {color};">{weight}%</div></div>
      </div>
      <div class="risk-bar-track"><div class="risk-bar-fill animated" style="width: {score}%; background: {color};"></div></div>
    </div>"#,
            name = factor.name,
            badge = risk_badge(&RiskLevel::from(factor.risk)),
            score = factor.score,
            color = factor.color,
            weight = factor.weight,
        );
    }

    out.push_str("\n  </div>\n</div>\n");
    out
}

pub fn init(ctx: &AppContext) -> Result<Disposer> {
    let names: Vec<&str> = RISK_FACTORS.iter().map(|f| f.name).collect();
    let weights: Vec<f64> = RISK_FACTORS.iter().map(|f| f64::from(f.weight)).collect();
    let colors: Vec<Color> = RISK_FACTORS.iter().map(|f| f.color).collect();

    ctx.doc().mount_chart(charts::horizontal_bar_chart(
        RISK_CHART_ID,
        &names,
        &weights,
        Some(colors.as_slice()),
    ));

    Ok(Disposer::new(|doc| {
        doc.destroy_chart(RISK_CHART_ID);
    }))
}
