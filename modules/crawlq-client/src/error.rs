use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestClientError>;

#[derive(Debug, Error)]
pub enum IngestClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The server answered with `success: false`.
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },

    #[error("invalid ResponseData: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for IngestClientError {
    fn from(err: reqwest::Error) -> Self {
        IngestClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for IngestClientError {
    fn from(err: serde_json::Error) -> Self {
        IngestClientError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for IngestClientError {
    fn from(err: url::ParseError) -> Self {
        IngestClientError::InvalidUrl(err.to_string())
    }
}
