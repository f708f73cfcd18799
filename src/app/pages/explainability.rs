use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Neutral => "neutral",
            Tone::Negative => "negative",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tone::Positive => "✓",
            Tone::Neutral => "⚠",
            Tone::Negative => "✕",
        }
    }
}

struct Explanation {
    tone: Tone,
    headline: &'static str,
    detail: &'static str,
}

struct Section {
    title: &'static str,
    icon: &'static str,
    items: [Explanation; 3],
}

const SECTIONS: [Section; 3] = [
    Section {
        title: "Score Drivers",
        icon: "📊",
        items: [
            Explanation {
                tone: Tone::Positive,
                headline: "Consistent monthly revenue growth",
                detail: "of 4.2% over the past quarter, stabilizing the financial predictability index.",
            },
            Explanation {
                tone: Tone::Positive,
                headline: "High transaction frequency",
                detail: "indicates sustained customer engagement, contributing +8 points to the activity score.",
            },
            Explanation {
                tone: Tone::Neutral,
                headline: "Average review sentiment",
                detail: "remains stable at 3.8/5, but lacks improvement trajectory compared to industry peers.",
            },
        ],
    },
    Section {
        title: "Risk Factors",
        icon: "🔴",
        items: [
            Explanation {
                tone: Tone::Negative,
                headline: "Revenue volatility increased by 18%",
                detail: "in Q3, reducing the financial stability index by 6 points.",
            },
            Explanation {
                tone: Tone::Negative,
                headline: "Payment delay days averaged 12.4",
                detail: "up from 8.1 in the previous quarter. This signals cash flow strain.",
            },
            Explanation {
                tone: Tone::Neutral,
                headline: "Customer complaint ratio",
                detail: "rose to 2.3%, approaching the moderate-risk threshold of 3%.",
            },
        ],
    },
    Section {
        title: "Positive Indicators",
        icon: "🟢",
        items: [
            Explanation {
                tone: Tone::Positive,
                headline: "Zero compliance flags",
                detail: "detected across all monitored regulatory databases.",
            },
            Explanation {
                tone: Tone::Positive,
                headline: "Business registration active",
                detail: "for 6+ years with no ownership disputes or liens on record.",
            },
            Explanation {
                tone: Tone::Positive,
                headline: "Diverse revenue channels",
                detail: "reduce dependency risk. No single channel exceeds 40% of total revenue.",
            },
        ],
    },
];

/// Delay between consecutive cards' entry animations.
const STAGGER_MS: usize = 80;

fn section_markup(out: &mut String, section: &Section) {
    let _ = write!(
        out,
        r#"
  <div class="card section">
    <h3 class="section-heading"><span>{}</span> {}</h3>"#,
        section.icon, section.title
    );
    for (i, item) in section.items.iter().enumerate() {
        let _ = write!(
            out,
            r#"
    <div class="explanation-card animated {tone}" style="animation-delay: {delay}ms;">
      <div class="explanation-icon {tone}">{icon}</div>
      <div class="explanation-text"><strong>{headline}</strong> {detail}</div>
    </div>"#,
            tone = item.tone.class(),
            delay = i * STAGGER_MS,
            icon = item.tone.icon(),
            headline = item.headline,
            detail = item.detail,
        );
    }
    out.push_str("\n  </div>");
}

pub fn render() -> String {
    let mut out = String::from(
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Explainability</h1>
      <p>Transparent breakdown of score factors and decision rationale</p>
    </div>
  </div>"#,
    );
    for section in &SECTIONS {
        section_markup(&mut out, section);
    }
    out.push_str("\n</div>\n");
    out
}
