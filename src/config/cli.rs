use crate::config::DashboardConfig;
use crate::utils::error::DashboardError;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "credlens")]
#[command(about = "Business reputation dashboard shell")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the score service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Navigate to a page and emit the resulting document as HTML
    Render {
        /// Page key or address fragment, e.g. `risk` or `#risk`
        #[arg(long)]
        page: Option<String>,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Submit business metrics through the analysis form
    Analyze {
        #[arg(long, default_value = "45000")]
        revenue: String,

        #[arg(long, default_value = "1200")]
        transactions: String,

        #[arg(long, default_value = "8")]
        payment_delay: String,

        #[arg(long, default_value = "22")]
        activity_freq: String,
    },
}

impl CliConfig {
    /// Load the configuration file (if any) and apply command-line overrides.
    pub fn load_config(&self) -> crate::Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) if path.trim().is_empty() => {
                return Err(DashboardError::MissingConfigError {
                    field: "--config".to_string(),
                })
            }
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        Ok(config)
    }
}
