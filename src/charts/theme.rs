//! Dark neon-green palette shared by every chart and badge.

use crate::charts::color::Color;
use serde::Serialize;

pub const ACCENT: Color = Color::rgb(0x00, 0xE8, 0x8F);
pub const SUCCESS: Color = ACCENT;
pub const DANGER: Color = Color::rgb(0xEF, 0x44, 0x44);
pub const WARNING: Color = Color::rgb(0xF5, 0xA6, 0x23);
pub const INFO: Color = Color::rgb(0x38, 0xBD, 0xF8);
pub const PURPLE: Color = Color::rgb(0xA7, 0x8B, 0xFA);
pub const TEAL: Color = Color::rgb(0x2D, 0xD4, 0xBF);
pub const GRID: Color = Color::rgba(255, 255, 255, 0.04);
pub const TEXT: Color = Color::rgb(0x50, 0x58, 0x68);
pub const TEXT_DARK: Color = Color::rgb(0x7A, 0x84, 0x94);
pub const TEXT_BRIGHT: Color = Color::rgb(0xF0, 0xF2, 0xF5);
pub const SURFACE: Color = Color::rgb(0x1A, 0x20, 0x29);
pub const BACKGROUND: Color = Color::rgb(0x0B, 0x0E, 0x11);
pub const TOOLTIP_BORDER: Color = Color::rgba(255, 255, 255, 0.08);

pub const FONT_FAMILY: &str = "'Inter', sans-serif";

/// Global defaults the charting runtime applies before any chart is built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDefaults {
    pub font_family: &'static str,
    pub color: Color,
    pub border_color: Color,
}

pub fn chart_defaults() -> ChartDefaults {
    ChartDefaults {
        font_family: FONT_FAMILY,
        color: TEXT,
        border_color: GRID,
    }
}
