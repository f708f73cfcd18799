//! Themed chart construction. Every builder is a pure function from plain
//! data to a [`Chart`] handle; nothing here keeps state.

pub mod color;
pub mod config;
pub mod theme;

use crate::utils::error::Result;
use color::Color;
use config::*;

/// Default sparkline canvas height, which is also its gradient height.
pub const SPARKLINE_HEIGHT: f64 = 60.0;
pub const LINE_GRADIENT_HEIGHT: f64 = 250.0;

/// An opaque handle to a built chart, bound to the canvas it draws into.
#[derive(Debug, Clone)]
pub struct Chart {
    canvas: String,
    config: ChartConfig,
}

impl Chart {
    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

/// One data series plus its styling overrides.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
    pub color: Option<Color>,
    pub colors: Option<Vec<Color>>,
    pub bar_thickness: Option<u32>,
}

impl Series {
    pub fn new(label: impl Into<String>, data: impl Into<Vec<f64>>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn bar_thickness(mut self, thickness: u32) -> Self {
        self.bar_thickness = Some(thickness);
        self
    }
}

fn themed_tooltip() -> Tooltip {
    Tooltip {
        background_color: Some(theme::SURFACE),
        title_color: Some(theme::TEXT_BRIGHT),
        body_color: Some(theme::TEXT_DARK),
        border_color: Some(theme::TOOLTIP_BORDER),
        border_width: Some(1),
        corner_radius: Some(8),
        padding: Some(10),
        ..Tooltip::default()
    }
}

fn ticks(padding: Option<u32>) -> Ticks {
    Ticks {
        font: Font {
            size: 11,
            weight: None,
        },
        color: theme::TEXT,
        padding,
        format: None,
    }
}

fn grid_lines() -> Grid {
    Grid {
        display: None,
        color: Some(theme::GRID),
        draw_border: Some(false),
    }
}

fn no_grid() -> Grid {
    Grid {
        display: Some(false),
        ..Grid::default()
    }
}

fn labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels.iter().map(|l| l.as_ref().to_string()).collect()
}

/// Single-series area line with no axes, legend or tooltip. The fill fades
/// out over `height` pixels, the canvas height.
pub fn sparkline(canvas: &str, data: &[f64], color: Option<Color>, height: Option<f64>) -> Chart {
    let color = color.unwrap_or(theme::ACCENT);
    let height = height.unwrap_or(SPARKLINE_HEIGHT);
    let dataset = Dataset {
        data: data.to_vec(),
        border_color: Some(color),
        border_width: Some(2),
        background_color: Some(Paint::Gradient {
            gradient: LinearGradient::vertical_fade(color, 0.25, height),
        }),
        fill: Some(true),
        point_radius: Some(0),
        tension: Some(0.4),
        ..Dataset::default()
    };

    Chart {
        canvas: canvas.to_string(),
        config: ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: (0..data.len()).map(|i| i.to_string()).collect(),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: None,
                plugins: Plugins {
                    legend: Legend { display: false },
                    tooltip: Tooltip {
                        enabled: Some(false),
                        ..Tooltip::default()
                    },
                },
                scales: Scales {
                    x: Scale::hidden(),
                    y: Scale::hidden(),
                },
                animation: Animation {
                    duration: 1000,
                    easing: "easeOutQuart",
                },
            },
        },
    }
}

/// Rounded vertical bars, one dataset per series, y starting at zero.
pub fn bar_chart<S: AsRef<str>>(canvas: &str, category_labels: &[S], series: &[Series]) -> Chart {
    let datasets = series
        .iter()
        .map(|s| {
            let paint = match (&s.colors, s.color) {
                (Some(colors), _) => Paint::PerItem(colors.clone()),
                (None, Some(color)) => Paint::Solid(color),
                (None, None) => Paint::Solid(theme::ACCENT),
            };
            Dataset {
                label: Some(s.label.clone()),
                data: s.data.clone(),
                background_color: Some(paint),
                border_radius: Some(6),
                border_skipped: Some(false),
                bar_thickness: Some(s.bar_thickness.unwrap_or(18)),
                max_bar_thickness: Some(24),
                ..Dataset::default()
            }
        })
        .collect();

    Chart {
        canvas: canvas.to_string(),
        config: ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: labels(category_labels),
                datasets,
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: None,
                plugins: Plugins {
                    legend: Legend { display: false },
                    tooltip: Tooltip {
                        box_width: Some(8),
                        box_height: Some(8),
                        use_point_style: Some(true),
                        ..themed_tooltip()
                    },
                },
                scales: Scales {
                    x: Scale {
                        grid: Some(no_grid()),
                        ticks: Some(ticks(Some(4))),
                        ..Scale::default()
                    },
                    y: Scale {
                        grid: Some(grid_lines()),
                        ticks: Some(ticks(Some(8))),
                        begin_at_zero: Some(true),
                        ..Scale::default()
                    },
                },
                animation: Animation {
                    duration: 1200,
                    easing: "easeOutQuart",
                },
            },
        },
    }
}

/// Single-series bars laid out along the vertical axis, values in percent
/// capped at 50.
pub fn horizontal_bar_chart<S: AsRef<str>>(
    canvas: &str,
    category_labels: &[S],
    data: &[f64],
    colors: Option<&[Color]>,
) -> Chart {
    let colors = colors
        .map(|c| c.to_vec())
        .unwrap_or_else(|| vec![theme::ACCENT, theme::INFO, theme::PURPLE, theme::TEAL]);

    let dataset = Dataset {
        data: data.to_vec(),
        background_color: Some(Paint::PerItem(colors)),
        border_radius: Some(6),
        border_skipped: Some(false),
        bar_thickness: Some(24),
        ..Dataset::default()
    };

    Chart {
        canvas: canvas.to_string(),
        config: ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: labels(category_labels),
                datasets: vec![dataset],
            },
            options: ChartOptions {
                index_axis: Some(IndexAxis::Y),
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: None,
                plugins: Plugins {
                    legend: Legend { display: false },
                    tooltip: Tooltip {
                        label_format: Some("{}%".to_string()),
                        ..themed_tooltip()
                    },
                },
                scales: Scales {
                    x: Scale {
                        grid: Some(grid_lines()),
                        ticks: Some(Ticks {
                            format: Some("{}%".to_string()),
                            ..ticks(None)
                        }),
                        max: Some(50.0),
                        ..Scale::default()
                    },
                    y: Scale {
                        grid: Some(no_grid()),
                        ticks: Some(Ticks {
                            font: Font {
                                size: 13,
                                weight: Some(500),
                            },
                            color: theme::TEXT_BRIGHT,
                            padding: Some(8),
                            format: None,
                        }),
                        ..Scale::default()
                    },
                },
                animation: Animation {
                    duration: 1200,
                    easing: "easeOutQuart",
                },
            },
        },
    }
}

/// Multi-series area lines; hovering an index highlights every series there.
pub fn line_chart<S: AsRef<str>>(canvas: &str, category_labels: &[S], series: &[Series]) -> Chart {
    let datasets = series
        .iter()
        .map(|s| {
            let color = s.color.unwrap_or(theme::ACCENT);
            Dataset {
                label: Some(s.label.clone()),
                data: s.data.clone(),
                border_color: Some(color),
                border_width: Some(2),
                background_color: Some(Paint::Gradient {
                    gradient: LinearGradient::vertical_fade(color, 0.12, LINE_GRADIENT_HEIGHT),
                }),
                fill: Some(true),
                point_radius: Some(0),
                point_hover_radius: Some(5),
                point_hover_background_color: Some(color),
                point_hover_border_color: Some(theme::BACKGROUND),
                point_hover_border_width: Some(2),
                tension: Some(0.4),
                ..Dataset::default()
            }
        })
        .collect();

    Chart {
        canvas: canvas.to_string(),
        config: ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: labels(category_labels),
                datasets,
            },
            options: ChartOptions {
                index_axis: None,
                responsive: true,
                maintain_aspect_ratio: false,
                interaction: Some(Interaction {
                    mode: InteractionMode::Index,
                    intersect: false,
                }),
                plugins: Plugins {
                    legend: Legend { display: false },
                    tooltip: Tooltip {
                        box_width: Some(8),
                        use_point_style: Some(true),
                        ..themed_tooltip()
                    },
                },
                scales: Scales {
                    x: Scale {
                        grid: Some(grid_lines()),
                        ticks: Some(ticks(Some(4))),
                        ..Scale::default()
                    },
                    y: Scale {
                        grid: Some(grid_lines()),
                        ticks: Some(ticks(Some(8))),
                        ..Scale::default()
                    },
                },
                animation: Animation {
                    duration: 1200,
                    easing: "easeOutQuart",
                },
            },
        },
    }
}
