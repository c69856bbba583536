use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Fetch failed for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Watch-list store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    /// Build a per-symbol fetch failure.
    pub fn fetch(symbol: &str, reason: impl Into<String>) -> Self {
        AppError::Fetch {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the scan can skip the current symbol and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Store(_) | AppError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
