use crate::charts::{self, theme, Series};
use crate::core::context::AppContext;
use crate::core::router::Disposer;
use crate::utils::error::Result;

pub const REPUTATION_CHART_ID: &str = "reputationChart";
pub const VOLATILITY_CHART_ID: &str = "volatilityChart";

const MONTHS: [&str; 8] = ["Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb"];
const REPUTATION: [f64; 8] = [62.0, 65.0, 68.0, 71.0, 74.0, 72.0, 76.0, 78.0];
const VOLATILITY: [f64; 8] = [18.0, 22.0, 15.0, 20.0, 25.0, 19.0, 14.0, 12.0];

/// Percentage change from the first to the last point.
fn change_pct(series: &[f64]) -> f64 {
    match (series.first(), series.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first * 100.0,
        _ => 0.0,
    }
}

pub fn render() -> String {
    let rep_change = change_pct(&REPUTATION);
    let vol_change = change_pct(&VOLATILITY);
    let rep_current = REPUTATION.last().copied().unwrap_or_default();
    let vol_current = VOLATILITY.last().copied().unwrap_or_default();

    format!(
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Trends</h1>
      <p>Historical performance analytics</p>
    </div>
  </div>
  <div class="card">
    <div class="card-header">
      <span class="card-title-lg">Monthly Reputation Score</span>
      <span class="badge badge-accent">{months} months</span>
    </div>
    <div class="trend-summary">
      <span class="trend-current">{rep_current}</span><span class="trend-caption">current</span>
      <span class="trend trend-up">{rep_arrow} {rep_change:.1}%</span>
    </div>
    <div class="chart-container"><canvas id="{rep_id}"></canvas></div>
    <div class="chart-legend"><span class="chart-legend-item"><span class="chart-legend-dot" style="background:{accent}"></span> Reputation Score</span></div>
  </div>
  <div class="card">
    <div class="card-header">
      <span class="card-title-lg">Revenue Volatility Index</span>
      <span class="badge badge-success">Declining ▼</span>
    </div>
    <div class="trend-summary">
      <span class="trend-current">{vol_current}%</span><span class="trend-caption">current</span>
      <span class="trend trend-up">{vol_arrow} {vol_change:.1}%</span>
    </div>
    <div class="chart-container"><canvas id="{vol_id}"></canvas></div>
    <div class="chart-legend"><span class="chart-legend-item"><span class="chart-legend-dot" style="background:{warning}"></span> Revenue Volatility</span></div>
  </div>
</div>
"#,
        months = MONTHS.len(),
        rep_current = rep_current,
        rep_arrow = if rep_change >= 0.0 { "▲" } else { "▼" },
        rep_change = rep_change.abs(),
        rep_id = REPUTATION_CHART_ID,
        accent = theme::ACCENT,
        vol_current = vol_current,
        vol_arrow = if vol_change >= 0.0 { "▲" } else { "▼" },
        vol_change = vol_change.abs(),
        vol_id = VOLATILITY_CHART_ID,
        warning = theme::WARNING,
    )
}

pub fn init(ctx: &AppContext) -> Result<Disposer> {
    let mut doc = ctx.doc();
    doc.mount_chart(charts::line_chart(
        REPUTATION_CHART_ID,
        &MONTHS,
        &[Series::new("Reputation Score", REPUTATION).color(theme::ACCENT)],
    ));
    doc.mount_chart(charts::line_chart(
        VOLATILITY_CHART_ID,
        &MONTHS,
        &[Series::new("Revenue Volatility", VOLATILITY).color(theme::WARNING)],
    ));

    Ok(Disposer::new(|doc| {
        doc.destroy_chart(REPUTATION_CHART_ID);
        doc.destroy_chart(VOLATILITY_CHART_ID);
    }))
}
