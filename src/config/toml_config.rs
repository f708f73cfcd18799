use crate::app::pages::Page;
use crate::core::router::Routable;
use crate::domain::ports::ServiceConfig;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub service: ServiceSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub base_url: String,
    pub analyze_path: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub app_name: String,
    pub default_page: String,
    pub user_name: String,
    pub user_role: String,
    pub user_email: String,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            app_name: "CredLens".to_string(),
            default_page: "dashboard".to_string(),
            user_name: "Sachin".to_string(),
            user_role: "Business Analyst".to_string(),
            user_email: "sachin@credlens.ai".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables stay as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.service.base_url)?;
        validation::validate_path_prefix("service.analyze_path", &self.service.analyze_path)?;
        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_positive_number("service.timeout_seconds", timeout, 1)?;
        }

        validation::validate_non_empty_string("ui.app_name", &self.ui.app_name)?;
        validation::validate_non_empty_string("ui.user_name", &self.ui.user_name)?;
        let pages: Vec<&str> = Page::ALL.iter().map(|p| p.key()).collect();
        validation::validate_one_of("ui.default_page", &self.ui.default_page, &pages)?;

        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }
}

impl ServiceConfig for DashboardConfig {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn analyze_path(&self) -> &str {
        &self.service.analyze_path
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.service.timeout_seconds
    }
}
