use thiserror::Error;

/// The series provider could not return usable data.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: HTTP {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    #[error("no data returned")]
    NoData,

    #[error("unsupported interval: {0}")]
    InvalidInterval(String),
}

impl FetchError {
    /// Network and decode failures are worth another attempt; the rest are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Request(_) | FetchError::Parse(_))
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("insufficient data for {indicator}: need {needed} valid points, have {available}")]
    InsufficientData {
        indicator: &'static str,
        needed: usize,
        available: usize,
    },
}

/// A chip form field is missing or not a number of the expected type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputParseError {
    #[error("missing field: {0}")]
    Missing(&'static str),

    #[error("invalid value for {field}: {value:?} ({reason})")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}
