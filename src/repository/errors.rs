use thiserror::Error;

/// Failure reported by the application itself, with a message meant for users.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP-like status code.
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "client")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            RepositoryError::Network(err.to_string())
        } else if err.is_decode() || err.is_body() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}
