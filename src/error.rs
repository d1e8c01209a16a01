use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

/// Every failure the client can surface to a caller.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Caller-supplied parameters were rejected before any request was sent.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A successful payload is missing something we cannot default.
    #[error("unexpected payload shape: {0}")]
    Schema(String),

    /// A field is present but does not parse as its declared type.
    #[error("field '{field}' could not be parsed: {reason}")]
    Format { field: String, reason: String },

    #[error("{0} not found in response")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl MarketError {
    pub(crate) fn missing(record: &str, field: &str) -> Self {
        MarketError::Schema(format!("{} is missing required field '{}'", record, field))
    }

    pub(crate) fn format(field: &str, reason: impl Into<String>) -> Self {
        MarketError::Format {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
