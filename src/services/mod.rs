pub mod artists;
pub mod events;
pub mod page;

use thiserror::Error;

use crate::models::config::ErrorConfig;
use crate::repository::errors::{ApiError, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Form(String),

    #[error("Entity not found")]
    NotFound,

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Trimmed identifier, usable as a single URL path segment.
pub(crate) fn ensure_id(id: &str) -> ServiceResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ServiceError::Form("identifiant manquant".to_string()));
    }
    if matches!(id, "." | "..") || id.contains(['/', '\\', '?', '#']) {
        return Err(ServiceError::Form(format!("identifiant invalide : {id}")));
    }
    Ok(id)
}

impl ServiceError {
    /// Message safe to show to users; raw transport details never leak.
    pub fn user_message(&self, errors: &ErrorConfig) -> String {
        match self {
            ServiceError::Form(message) => message.clone(),
            ServiceError::NotFound => errors.messages.not_found.clone(),
            ServiceError::Api(err) => err.message.clone(),
            ServiceError::Repository(RepositoryError::Network(_)) => {
                errors.messages.network.clone()
            }
            ServiceError::Repository(RepositoryError::Timeout(_)) => {
                errors.messages.timeout.clone()
            }
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                errors.messages.generic.clone()
            }
        }
    }
}
