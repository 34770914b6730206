use crate::domain::locale::Locale;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ApiError(_) => ErrorCategory::Network,
            DashboardError::BackendError { .. } => ErrorCategory::Backend,
            DashboardError::ZipError(_)
            | DashboardError::CsvError(_)
            | DashboardError::IoError(_)
            | DashboardError::SerializationError(_) => ErrorCategory::Output,
            DashboardError::ConfigError { .. }
            | DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路或後端暫時性錯誤，可重試
            DashboardError::ApiError(_) => ErrorSeverity::Medium,
            DashboardError::BackendError { status, .. } if *status >= 500 => {
                ErrorSeverity::Medium
            }
            DashboardError::BackendError { .. } => ErrorSeverity::High,
            DashboardError::CsvError(_) | DashboardError::SerializationError(_) => {
                ErrorSeverity::High
            }
            DashboardError::ZipError(_) | DashboardError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 給終端使用者看的訊息；後端錯誤訊息原樣顯示
    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::BackendError { message, .. } => message.clone(),
            DashboardError::ApiError(e) if e.is_timeout() => {
                "The dashboard API did not respond in time".to_string()
            }
            DashboardError::ApiError(_) => "Could not reach the dashboard API".to_string(),
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// 網路層失敗時改用語系的通用訊息
    pub fn localized_message(&self, locale: Locale) -> String {
        match self {
            DashboardError::BackendError { message, .. } => message.clone(),
            DashboardError::ApiError(_) => locale.load_failure_message().to_string(),
            other => other.user_friendly_message(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base URL and your network connection, then retry",
            ErrorCategory::Backend => "Verify the store id and API token are valid for this backend",
            ErrorCategory::Output => "Make sure the output path exists and is writable",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
