use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Metrics submitted to the score service, built fresh from the analysis form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInput {
    #[serde(serialize_with = "serialize_js_number")]
    pub revenue: f64,
    pub transactions: i64,
    #[serde(serialize_with = "serialize_js_number")]
    pub payment_delay: f64,
    pub activity_freq: i64,
}

/// Integral floats go on the wire as integers (`45000`, not `45000.0`).
fn serialize_js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Moderate,
    /// Any label other than Low/Moderate; kept verbatim for display.
    High(String),
}

impl RiskLevel {
    /// Badge modifier used by the result card and the risk pages.
    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Moderate => "warning",
            RiskLevel::High(_) => "danger",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High(label) => label,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Low" => RiskLevel::Low,
            "Moderate" => RiskLevel::Moderate,
            _ => RiskLevel::High(label),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(label: &str) -> Self {
        RiskLevel::from(label.to_string())
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.label().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    pub financial_stability: f64,
    pub sentiment: f64,
    pub behavioral: f64,
    pub activity: f64,
}

/// Score computed by the external service for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub grade: String,
    pub risk: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_risk_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorScores>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_input_wire_format() {
        let input = MetricInput {
            revenue: 45000.0,
            transactions: 1200,
            payment_delay: 8.0,
            activity_freq: 22,
        };
        let value = serde_json::to_value(input).unwrap();
        assert_eq!(
            value,
            json!({"revenue": 45000, "transactions": 1200, "paymentDelay": 8, "activityFreq": 22})
        );

        let fractional = MetricInput {
            payment_delay: 8.5,
            ..input
        };
        let value = serde_json::to_value(fractional).unwrap();
        assert_eq!(value["paymentDelay"], json!(8.5));
    }

    #[test]
    fn test_score_result_minimal() {
        let result: ScoreResult =
            serde_json::from_value(json!({"score": 78, "grade": "B+", "risk": "Low"})).unwrap();
        assert_eq!(result.score, 78.0);
        assert_eq!(result.grade, "B+");
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.factors.is_none());
    }

    #[test]
    fn test_score_result_with_extras() {
        let result: ScoreResult = serde_json::from_value(json!({
            "score": 52,
            "grade": "D",
            "risk": "High",
            "ml_risk_probability": 0.81,
            "factors": {"financialStability": 40, "sentiment": 50, "behavioral": 60, "activity": 33}
        }))
        .unwrap();
        assert_eq!(result.risk, RiskLevel::High("High".to_string()));
        assert_eq!(result.ml_risk_probability, Some(0.81));
        assert_eq!(result.factors.map(|f| f.activity), Some(33.0));
    }

    #[test]
    fn test_unknown_risk_is_high_equivalent() {
        let level = RiskLevel::from("Severe");
        assert_eq!(level.badge_class(), "danger");
        assert_eq!(level.to_string(), "Severe");
        assert_eq!(RiskLevel::Moderate.badge_class(), "warning");
        assert_eq!(RiskLevel::Low.badge_class(), "success");
    }
}
