use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Tracking API request failed for satellite {satellite_id}: {message}")]
    FetchError {
        satellite_id: String,
        message: String,
    },

    #[error("Malformed tracking response for satellite {satellite_id}: {message}")]
    MalformedResponseError {
        satellite_id: String,
        message: String,
    },

    #[error("Email delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Log write failed for {path}: {source}")]
    LogWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Satellite queries exceeded deadline of {seconds}s")]
    TimeoutError { seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Delivery,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertError {
    pub fn fetch(satellite_id: &str, message: impl Into<String>) -> Self {
        AlertError::FetchError {
            satellite_id: satellite_id.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(satellite_id: &str, message: impl Into<String>) -> Self {
        AlertError::MalformedResponseError {
            satellite_id: satellite_id.to_string(),
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        AlertError::DeliveryError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AlertError::FetchError { .. } | AlertError::HttpError(_) | AlertError::TimeoutError { .. } => {
                ErrorCategory::Network
            }
            AlertError::MalformedResponseError { .. } => ErrorCategory::Data,
            AlertError::DeliveryError { .. } => ErrorCategory::Delivery,
            AlertError::LogWriteError { .. } | AlertError::IoError(_) => ErrorCategory::Storage,
            AlertError::ConfigError { .. }
            | AlertError::MissingConfigError { .. }
            | AlertError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        if let AlertError::TimeoutError { .. } = self {
            return ErrorSeverity::Medium;
        }
        match self.category() {
            // 單顆衛星失敗不影響整批
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Delivery => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AlertError::FetchError { .. } | AlertError::HttpError(_) => {
                "Check network connectivity and that the tracking API key is valid"
            }
            AlertError::TimeoutError { .. } => "Increase --timeout-seconds or reduce the satellite list",
            AlertError::MalformedResponseError { .. } => {
                "The tracking API returned an unexpected payload; retry on the next scheduled run"
            }
            AlertError::DeliveryError { .. } => {
                "Verify SMTP host, port and credentials (app passwords are required by some providers)"
            }
            AlertError::LogWriteError { .. } | AlertError::IoError(_) => {
                "Check that the log directory is writable"
            }
            AlertError::ConfigError { .. }
            | AlertError::MissingConfigError { .. }
            | AlertError::InvalidConfigValueError { .. } => {
                "Review the configuration file or environment variables"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AlertError::FetchError { satellite_id, .. } => {
                format!("Could not reach the tracking API for satellite {}", satellite_id)
            }
            AlertError::MalformedResponseError { satellite_id, .. } => {
                format!("Tracking data for satellite {} could not be read", satellite_id)
            }
            AlertError::DeliveryError { .. } => "The notification email could not be sent".to_string(),
            AlertError::LogWriteError { path, .. } => format!("Could not write to log file {}", path),
            AlertError::MissingConfigError { field } => format!("Missing required setting: {}", field),
            AlertError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
