use thiserror::Error;

pub type Result<T> = std::result::Result<T, SamplerError>;

#[derive(Error, Debug)]
pub enum SamplerError {
    /// The backing store could not be reached or rejected the statement.
    /// Callers are expected to retry later.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
