//! Parse-or-default coercion for text form fields.
//!
//! Field values are never validated: the longest numeric prefix wins and
//! anything unparseable (including an empty field) becomes zero.

use regex::Regex;
use std::sync::OnceLock;

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap())
}

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d+").unwrap())
}

/// `"12.5kg"` -> 12.5, `""` -> 0.0, `"abc"` -> 0.0
pub fn float_or_zero(raw: &str) -> f64 {
    float_prefix()
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `"22.7"` -> 22, `" 1200 "` -> 1200, `""` -> 0
pub fn int_or_zero(raw: &str) -> i64 {
    int_prefix()
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}
