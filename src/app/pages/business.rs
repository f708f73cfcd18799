//! Analysis form: the only page that talks to the score service.

use crate::core::context::AppContext;
use crate::core::document::{Document, Handler};
use crate::core::router::Disposer;
use crate::domain::model::{MetricInput, ScoreResult};
use crate::utils::coerce::{float_or_zero, int_or_zero};
use crate::utils::error::Result;
use crate::utils::html::{esc, format_grouped, format_number};
use futures_util::FutureExt;
use std::fmt::Write as _;
use std::sync::Arc;

pub const FORM_ID: &str = "analysisForm";
pub const SUBMIT_ID: &str = "runAnalysisBtn";
pub const RESULT_ID: &str = "analysisResult";
pub const BUSY_CLASS: &str = "btn-loading";
pub const FAILURE_ALERT: &str = "Analysis failed. See console.";

pub const REVENUE: &str = "revenue";
pub const TRANSACTIONS: &str = "transactions";
pub const REVIEW_TEXT: &str = "reviewText";
pub const PAYMENT_DELAY: &str = "paymentDelay";
pub const ACTIVITY_FREQ: &str = "activityFreq";

/// Payment delays above this many days are called out as a concern.
const DELAY_CONCERN_DAYS: f64 = 10.0;

const DEFAULT_REVIEW: &str = "Great coffee and friendly staff. The ambiance is cozy and the prices are fair. Would recommend to friends.";

struct Field {
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    value: &'static str,
    hint: &'static str,
}

const NUMERIC_FIELDS: [Field; 4] = [
    Field {
        id: REVENUE,
        label: "Monthly Revenue ($)",
        placeholder: "e.g. 45000",
        value: "45000",
        hint: "Average monthly revenue over the past 3 months",
    },
    Field {
        id: TRANSACTIONS,
        label: "Number of Transactions",
        placeholder: "e.g. 1200",
        value: "1200",
        hint: "Total monthly transaction count",
    },
    Field {
        id: PAYMENT_DELAY,
        label: "Payment Delay Days",
        placeholder: "e.g. 5",
        value: "8",
        hint: "Average days between invoice and payment",
    },
    Field {
        id: ACTIVITY_FREQ,
        label: "Activity Frequency",
        placeholder: "e.g. 22",
        value: "22",
        hint: "Number of active business days per month",
    },
];

fn input_markup(out: &mut String, field: &Field) {
    let _ = write!(
        out,
        r#"
        <div class="form-group">
          <label class="form-label" for="{id}">{label}</label>
          <input type="number" id="{id}" class="form-input" placeholder="{placeholder}" value="{value}" />
          <span class="form-hint">{hint}</span>
        </div>"#,
        id = field.id,
        label = field.label,
        placeholder = field.placeholder,
        value = field.value,
        hint = field.hint,
    );
}

pub fn render() -> String {
    let mut out = String::from(
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Business Analysis</h1>
      <p>Input business metrics to generate a reputation analysis</p>
    </div>
  </div>
  <div class="grid-2">
    <div class="card card-lg">
      <h3 class="section-heading"><span>📋</span> Business Metrics</h3>
      <form id="analysisForm">"#,
    );

    let (head, tail) = NUMERIC_FIELDS.split_at(2);
    for field in head {
        input_markup(&mut out, field);
    }
    let _ = write!(
        out,
        r#"
        <div class="form-group">
          <label class="form-label" for="{id}">Average Review Text</label>
          <textarea id="{id}" class="form-input" placeholder="Paste a representative customer review...">{review}</textarea>
          <span class="form-hint">A sample review that represents typical customer feedback</span>
        </div>"#,
        id = REVIEW_TEXT,
        review = DEFAULT_REVIEW,
    );
    for field in tail {
        input_markup(&mut out, field);
    }

    let _ = write!(
        out,
        r#"
        <button type="submit" class="btn btn-primary btn-lg" id="{submit}">Run Reputation Analysis</button>
      </form>
    </div>
    <div class="card card-lg" id="{result}">{placeholder}</div>
  </div>
</div>
"#,
        submit = SUBMIT_ID,
        result = RESULT_ID,
        placeholder = result_placeholder(),
    );
    out
}

fn result_placeholder() -> &'static str {
    r#"<h3 class="section-heading"><span>🧠</span> Analysis Result</h3>
      <div class="result-empty"><p>Submit business metrics to<br/>generate a reputation analysis</p></div>"#
}

/// Seed the form with its initial values and wire the submit handler.
pub fn init(ctx: &AppContext) -> Result<Disposer> {
    let mut doc = ctx.doc();
    if !doc.has_element(FORM_ID) || !doc.has_element(SUBMIT_ID) {
        return Ok(Disposer::none());
    }

    for field in &NUMERIC_FIELDS {
        doc.set_field(field.id, field.value);
    }
    doc.set_field(REVIEW_TEXT, DEFAULT_REVIEW);

    let handler: Handler = Arc::new(|ctx: AppContext| submit(ctx).boxed());
    let id = doc.add_listener(FORM_ID, "submit", handler);

    Ok(Disposer::new(move |doc| {
        doc.remove_listener(id);
    }))
}

/// Build the payload from the form; anything unparseable becomes zero.
pub fn read_form(doc: &Document) -> MetricInput {
    let field = |id: &str| doc.field(id).unwrap_or("");
    MetricInput {
        revenue: float_or_zero(field(REVENUE)),
        transactions: int_or_zero(field(TRANSACTIONS)),
        payment_delay: float_or_zero(field(PAYMENT_DELAY)),
        activity_freq: int_or_zero(field(ACTIVITY_FREQ)),
    }
}

/// Submit handler: one request per submission, no retry.
pub async fn submit(ctx: AppContext) {
    let input = {
        let mut doc = ctx.doc();
        doc.add_class(SUBMIT_ID, BUSY_CLASS);
        read_form(&doc)
    };
    tracing::info!(
        "Submitting analysis: revenue={} transactions={} paymentDelay={} activityFreq={}",
        input.revenue,
        input.transactions,
        input.payment_delay,
        input.activity_freq
    );

    let outcome = ctx.scores().compute_score(&input).await;

    let mut doc = ctx.doc();
    doc.remove_class(SUBMIT_ID, BUSY_CLASS);
    match outcome {
        Ok(result) => {
            tracing::info!(
                "Analysis complete: score={} grade={} risk={}",
                result.score,
                result.grade,
                result.risk
            );
            if doc.has_element(RESULT_ID) {
                doc.set_fragment(RESULT_ID, render_result(&result, &input));
            }
        }
        Err(e) => {
            tracing::error!("❌ Analysis failed: {} (Category: {:?})", e, e.category());
            doc.alert(FAILURE_ALERT);
        }
    }
}

/// Result card: service verdict merged with the submitted metrics.
pub fn render_result(result: &ScoreResult, input: &MetricInput) -> String {
    let delay_concern = input.payment_delay > DELAY_CONCERN_DAYS;
    let delay_cls = if delay_concern { "negative" } else { "positive" };

    format!(
        r#"<h3 class="section-heading"><span>🧠</span> Analysis Result</h3>
    <div class="page-enter result">
      <div class="result-score">{score}</div>
      <div class="result-caption">Reputation Score</div>
      <div class="badges">
        <span class="badge badge-accent">Grade {grade}</span>
        <span class="badge badge-{risk_cls}">{risk} Risk</span>
      </div>
      <div class="divider"></div>
      <div class="explanation-card positive animated">
        <div class="explanation-icon positive">✓</div>
        <div class="explanation-text"><strong>Monthly revenue of ${revenue}</strong> reflects stable income.</div>
      </div>
      <div class="explanation-card {delay_cls} animated" style="animation-delay: 80ms;">
        <div class="explanation-icon {delay_cls}">{delay_icon}</div>
        <div class="explanation-text"><strong>Payment delay of {delay} days</strong> {delay_text}</div>
      </div>
      <div class="explanation-card positive animated" style="animation-delay: 160ms;">
        <div class="explanation-icon positive">✓</div>
        <div class="explanation-text"><strong>{transactions} transactions</strong> demonstrate consistent activity.</div>
      </div>
    </div>"#,
        score = format_number(result.score),
        grade = esc(&result.grade),
        risk_cls = result.risk.badge_class(),
        risk = esc(result.risk.label()),
        revenue = format_grouped(input.revenue),
        delay_cls = delay_cls,
        delay_icon = if delay_concern { "✕" } else { "✓" },
        delay = format_number(input.payment_delay),
        delay_text = if delay_concern {
            "indicates concerns."
        } else {
            "is within healthy range."
        },
        transactions = input.transactions,
    )
}
