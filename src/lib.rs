pub mod adapters;
pub mod app;
pub mod charts;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::DashboardConfig;

pub use adapters::http::HttpScoreService;
pub use app::pages::{nav_entries, Page};
pub use core::{AppContext, Document, NavigationOutcome, Routable, Router};
pub use domain::model::{MetricInput, RiskLevel, ScoreResult};
pub use domain::ports::ScoreService;
pub use utils::error::{DashboardError, Result};
