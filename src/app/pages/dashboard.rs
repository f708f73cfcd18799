//! Overview page: metric cards, score breakdown, performance ring and the
//! factor table. Also owns the side panel shared by most pages.

use crate::charts::color::Color;
use crate::charts::{self, theme, Series};
use crate::core::animation::{ring_circumference, ring_dash_offset, NumberAnimation};
use crate::core::context::AppContext;
use crate::core::router::Disposer;
use crate::domain::model::RiskLevel;
use crate::utils::error::Result;
use crate::utils::html::esc;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt::Write as _;
use std::time::Duration;

pub const RING_RADIUS: f64 = 70.0;
pub const SCORE_NUMBER_ID: &str = "scoreNumber";
pub const SCORE_RING_ID: &str = "scoreRing";
pub const BREAKDOWN_CHART_ID: &str = "breakdownChart";
const COUNT_UP: Duration = Duration::from_millis(1000);

struct Headline {
    value: f64,
    grade: &'static str,
    risk: &'static str,
}

const SCORE: Headline = Headline {
    value: 78.0,
    grade: "B+",
    risk: "Low",
};

struct MetricCard {
    name: &'static str,
    score: u32,
    icon: &'static str,
    spark: &'static [f64],
    trend: &'static str,
    trend_up: bool,
    stats: &'static [(&'static str, &'static str)],
}

const METRIC_CARDS: [MetricCard; 3] = [
    MetricCard {
        name: "Financial Stability",
        score: 82,
        icon: "📊",
        spark: &[65.0, 70.0, 68.0, 74.0, 78.0, 80.0, 82.0],
        trend: "+3.2%",
        trend_up: true,
        stats: &[("📈", "+3.2%"), ("💰", "$45K")],
    },
    MetricCard {
        name: "Sentiment Score",
        score: 74,
        icon: "💬",
        spark: &[80.0, 78.0, 76.0, 73.0, 75.0, 72.0, 74.0],
        trend: "-1.8%",
        trend_up: false,
        stats: &[("⭐", "3.8/5"), ("📝", "1.2K")],
    },
    MetricCard {
        name: "Behavioral Score",
        score: 88,
        icon: "🔄",
        spark: &[70.0, 74.0, 78.0, 82.0, 84.0, 86.0, 88.0],
        trend: "+5.1%",
        trend_up: true,
        stats: &[("✅", "+5.1%"), ("🔁", "22/mo")],
    },
];

struct FactorRow {
    name: &'static str,
    category: &'static str,
    weight: u32,
    score: u32,
    color: Color,
}

const FACTORS: [FactorRow; 4] = [
    FactorRow { name: "Financial Stability", category: "Finance", weight: 40, score: 82, color: theme::ACCENT },
    FactorRow { name: "Sentiment Analysis", category: "NLP", weight: 30, score: 74, color: theme::PURPLE },
    FactorRow { name: "Behavioral Consistency", category: "Behavior", weight: 20, score: 88, color: theme::TEAL },
    FactorRow { name: "Activity Reliability", category: "Activity", weight: 10, score: 69, color: theme::WARNING },
];

const BREAKDOWN_LABELS: [&str; 4] = ["Financial", "Sentiment", "Behavior", "Activity"];

fn spark_id(index: usize) -> String {
    format!("spark-{}", index)
}

pub fn render(ctx: &AppContext) -> String {
    let circumference = ring_circumference(RING_RADIUS);
    let offset = ring_dash_offset(SCORE.value, RING_RADIUS);
    let risk = RiskLevel::from(SCORE.risk);
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Hello {user} 👋</h1>
      <p>Let's check your business reputation today!</p>
    </div>
    <div class="search-bar"><input type="text" placeholder="Search metrics..." /></div>
  </div>
  <div class="grid-3">"#,
        user = esc(&ctx.config().ui.user_name)
    );

    for (i, card) in METRIC_CARDS.iter().enumerate() {
        let _ = write!(
            out,
            r#"
    <div class="metric-card-colored">
      <div class="metric-head"><div class="metric-icon">{icon}</div><span class="trend trend-{dir}">{trend}</span></div>
      <div class="metric-label">{name}</div>
      <div class="metric-bottom"><span class="metric-value">{score}<span class="metric-max">/100</span></span></div>
      <div class="sparkline"><canvas id="{spark}"></canvas></div>
      <div class="mini-stats">"#,
            icon = card.icon,
            dir = if card.trend_up { "up" } else { "down" },
            trend = card.trend,
            name = card.name,
            score = card.score,
            spark = spark_id(i),
        );
        for (icon, label) in card.stats {
            let _ = write!(out, r#"<span class="mini-stat">{} {}</span>"#, icon, label);
        }
        out.push_str("</div>\n    </div>");
    }

    let _ = write!(
        out,
        r#"
  </div>
  <div class="charts-row">
    <div class="card">
      <div class="card-header">
        <span class="card-title-lg">Score Breakdown</span>
        <div class="chart-legend">
          <span class="chart-legend-item"><span class="chart-legend-dot" style="background:{accent}"></span> Score</span>
          <span class="chart-legend-item"><span class="chart-legend-dot" style="background:{teal}"></span> Weight</span>
        </div>
      </div>
      <div class="chart-container"><canvas id="{chart}"></canvas></div>
    </div>
    <div class="card performance">
      <div class="card-header"><span class="card-title-lg">Performance</span></div>
      <div class="score-meter">
        <svg viewBox="0 0 160 160">
          <circle class="score-meter-bg" cx="80" cy="80" r="{radius}" />
          <circle id="{ring}" class="score-meter-fill" cx="80" cy="80" r="{radius}" stroke-dasharray="{circ:.3}" stroke-dashoffset="{circ:.3}" data-target-offset="{offset:.3}" />
        </svg>
        <div class="score-meter-text">
          <div id="{number}" class="score-number" data-target="{score}">0</div>
          <div class="score-label">Your Score</div>
        </div>
      </div>
      <div class="badges">
        <span class="badge badge-accent">Grade {grade}</span>
        <span class="badge badge-{risk_cls}">{risk} Risk</span>
      </div>
    </div>
  </div>
  <div class="card">
    <div class="card-header"><span class="card-title-lg">Factor Analysis</span></div>
    <table class="data-table">
      <thead><tr><th>#</th><th>Factor</th><th>Category</th><th>Weight</th><th>Score</th></tr></thead>
      <tbody>"#,
        accent = theme::ACCENT,
        teal = theme::TEAL,
        chart = BREAKDOWN_CHART_ID,
        radius = RING_RADIUS,
        ring = SCORE_RING_ID,
        circ = circumference,
        offset = offset,
        number = SCORE_NUMBER_ID,
        score = SCORE.value,
        grade = SCORE.grade,
        risk_cls = risk.badge_class(),
        risk = risk,
    );

    for (rank, row) in FACTORS.iter().enumerate() {
        let initial = row.name.chars().next().unwrap_or('?');
        let _ = write!(
            out,
            r#"
        <tr><td class="table-rank">{rank}</td><td><div class="table-name-cell"><span class="table-avatar" style="background: {color};">{initial}</span>{name}</div></td><td>{category}</td><td>{weight}%</td><td class="table-value-highlight">{score}</td></tr>"#,
            rank = rank + 1,
            color = row.color,
            initial = initial,
            name = row.name,
            category = row.category,
            weight = row.weight,
            score = row.score,
        );
    }

    out.push_str("\n      </tbody>\n    </table>\n  </div>\n</div>\n");
    out
}

pub fn init(ctx: &AppContext) -> Result<Disposer> {
    let mut doc = ctx.doc();

    doc.start_animation(SCORE_NUMBER_ID, NumberAnimation::count_up(SCORE.value, COUNT_UP));
    doc.set_style(
        SCORE_RING_ID,
        "stroke-dashoffset",
        format!("{:.3}", ring_dash_offset(SCORE.value, RING_RADIUS)),
    );

    let mut canvases = Vec::with_capacity(METRIC_CARDS.len() + 1);
    for (i, card) in METRIC_CARDS.iter().enumerate() {
        let color = if card.trend_up { theme::ACCENT } else { theme::DANGER };
        let chart = charts::sparkline(&spark_id(i), card.spark, Some(color), None);
        canvases.push(chart.canvas().to_string());
        doc.mount_chart(chart);
    }

    let breakdown = charts::bar_chart(
        BREAKDOWN_CHART_ID,
        &BREAKDOWN_LABELS,
        &[
            Series::new("Score", FACTORS.iter().map(|f| f64::from(f.score)).collect::<Vec<_>>())
                .color(theme::ACCENT)
                .bar_thickness(16),
            Series::new("Weight", FACTORS.iter().map(|f| f64::from(f.weight)).collect::<Vec<_>>())
                .color(theme::TEAL)
                .bar_thickness(16),
        ],
    );
    canvases.push(breakdown.canvas().to_string());
    doc.mount_chart(breakdown);

    Ok(Disposer::new(move |doc| {
        doc.cancel_animation(SCORE_NUMBER_ID);
        for canvas in &canvases {
            doc.destroy_chart(canvas);
        }
    }))
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day { day: u32, today: bool, event: bool },
}

const EVENT_DAYS: [u32; 4] = [5, 12, 18, 25];

/// Monday-first grid for the month containing `today`.
pub fn calendar_cells(today: NaiveDate) -> Vec<CalendarCell> {
    let first = today - Days::new(u64::from(today.day0()));
    let leading = first.weekday().num_days_from_monday() as usize;

    let mut cells = vec![CalendarCell::Blank; leading];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .map(|d| CalendarCell::Day {
                day: d.day(),
                today: d == today,
                event: EVENT_DAYS.contains(&d.day()),
            }),
    );
    cells
}

const TODOS: [(&str, &str, bool); 5] = [
    ("Review Financial Report", "Analysis · 08:00 AM", false),
    ("Update Sentiment API", "Integration", false),
    ("Check Risk Thresholds", "Risk · Urgent", false),
    ("Run Weekly Analysis", "Completed · 12:40 PM", true),
    ("Generate Monthly Report", "Completed · 04:30 PM", true),
];

pub fn render_panel(ctx: &AppContext, today: NaiveDate) -> String {
    let ui = &ctx.config().ui;
    let initial = ui.user_name.chars().next().unwrap_or('?');
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<div class="profile-card">
  <div class="profile-avatar">{initial}<span class="online-dot"></span></div>
  <div class="profile-name">{name}</div>
  <div class="profile-role">{role}</div>
</div>
<div class="calendar-widget">
  <div class="calendar-header"><span class="calendar-title">{month}</span></div>
  <div class="calendar-grid">"#,
        initial = esc(&initial.to_string()),
        name = esc(&ui.user_name),
        role = esc(&ui.user_role),
        month = today.format("%B %Y"),
    );
    for label in ["M", "T", "W", "T", "F", "S", "S"] {
        let _ = write!(out, r#"<span class="day-label">{}</span>"#, label);
    }
    for cell in calendar_cells(today) {
        match cell {
            CalendarCell::Blank => out.push_str(r#"<span class="day"></span>"#),
            CalendarCell::Day { day, today, event } => {
                let _ = write!(
                    out,
                    r#"<span class="day{}{}">{}</span>"#,
                    if today { " today" } else { "" },
                    if event { " has-event" } else { "" },
                    day
                );
            }
        }
    }
    out.push_str("</div>\n</div>\n<div class=\"todo\">\n  <span class=\"card-title-lg\">To Do List</span>\n  <ul class=\"todo-list\">");

    for (title, meta, done) in TODOS {
        let _ = write!(
            out,
            r#"
    <li class="todo-item"><div class="todo-check{done}"></div><div class="todo-content"><div class="todo-title{done_text}">{title}</div><div class="todo-meta">{meta}</div></div></li>"#,
            done = if done { " done" } else { "" },
            done_text = if done { " done-text" } else { "" },
            title = title,
            meta = meta,
        );
    }
    out.push_str("\n  </ul>\n</div>\n");
    out
}
