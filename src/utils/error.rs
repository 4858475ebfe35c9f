use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Source unavailable: {url} ({reason})")]
    SourceUnavailable { url: String, reason: String },

    #[error("Metadata extraction failed for {url}: {reason}")]
    ExtractionFailure { url: String, reason: String },

    #[error("Request to {url} timed out after {millis}ms")]
    Timeout { url: String, millis: u128 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unexpected failure: {message}")]
    Unexpected { message: String },
}

impl FolioError {
    /// 屬於單一來源的失敗，呼叫端會轉成「沒有資料」而不是回報錯誤
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            FolioError::SourceUnavailable { .. }
                | FolioError::ExtractionFailure { .. }
                | FolioError::Timeout { .. }
                | FolioError::Http(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FolioError::ConfigError { message } => format!("Configuration problem: {}", message),
            FolioError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            FolioError::IoError(e) => format!("Could not read a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FolioError::ConfigError { .. } | FolioError::InvalidConfigValueError { .. } => {
                "Check the TOML file and CLI flags; run with --verbose for details"
            }
            FolioError::IoError(_) => "Make sure the config file exists and is readable",
            FolioError::Database(_) => "Verify DATABASE_URL and that the database accepts connections",
            FolioError::SourceUnavailable { .. }
            | FolioError::Timeout { .. }
            | FolioError::Http(_) => "The remote site may be down; the request will degrade to curated data",
            _ => "Retry the request; if the problem persists inspect the server logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
