use crate::utils::error::{DashboardError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue with a different alpha; used for gradient stops.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

fn rgb_fn() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$")
            .unwrap()
    })
}

fn invalid(value: &str, reason: &str) -> DashboardError {
    DashboardError::InvalidConfigValueError {
        field: "color".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Color {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Color::TRANSPARENT);
        }

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid(s, "invalid hex digit"));
            }
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(invalid(s, "expected #RGB or #RRGGBB")),
            };
            let channel = |i: usize| {
                u8::from_str_radix(&expanded[i..i + 2], 16)
                    .map_err(|_| invalid(s, "invalid hex digit"))
            };
            return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let caps = rgb_fn()
            .captures(s)
            .ok_or_else(|| invalid(s, "expected #hex, rgb() or rgba()"))?;
        let channel = |i: usize| {
            caps[i]
                .parse::<u8>()
                .map_err(|_| invalid(s, "channel out of range"))
        };
        let alpha = match caps.get(4) {
            Some(m) => m
                .as_str()
                .parse::<f32>()
                .map_err(|_| invalid(s, "invalid alpha"))?,
            None => 1.0,
        };
        Ok(Color::rgba(channel(1)?, channel(2)?, channel(3)?, alpha.clamp(0.0, 1.0)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Color::TRANSPARENT {
            f.write_str("transparent")
        } else if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
