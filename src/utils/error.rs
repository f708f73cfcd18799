use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to render page '{page}': {message}")]
    RenderError { page: String, message: String },

    #[error("Failed to initialise page '{page}': {message}")]
    InitError { page: String, message: String },

    #[error("Score service responded with status {status}: {message}")]
    ServiceError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Page,
    System,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ApiError(_) | DashboardError::ServiceError { .. } => {
                ErrorCategory::Network
            }
            DashboardError::SerializationError(_) => ErrorCategory::Data,
            DashboardError::ConfigError { .. }
            | DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashboardError::RenderError { .. } | DashboardError::InitError { .. } => {
                ErrorCategory::Page
            }
            DashboardError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Short message suitable for an alert or the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Analysis failed: {}", self),
            ErrorCategory::Data => "Analysis failed: the score service returned an unreadable response".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Page => format!("Page could not be displayed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the score service is running and reachable at the configured base URL",
            ErrorCategory::Data => "Check that the score service returns {score, grade, risk} as JSON",
            ErrorCategory::Configuration => "Fix the configuration file or the command-line overrides and try again",
            ErrorCategory::Page => "Navigate to another page; the dashboard stays usable",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    /// The error message followed by its `source()` chain, one cause per line.
    pub fn trace(&self) -> String {
        let mut lines = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            lines.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        lines.join("\n")
    }
}
