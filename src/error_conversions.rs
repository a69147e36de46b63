//! Error conversion glue between the repository, form and service layers.

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Api(api) if api.code == 404 => ServiceError::NotFound,
            RepositoryError::Api(api) => ServiceError::Api(api),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Internal(format!("Failed to encode request body: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::ApiError;

    #[test]
    fn not_found_api_error_becomes_not_found() {
        let err = ServiceError::from(RepositoryError::from(ApiError::new(404, "absent")));

        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn other_api_errors_keep_their_message() {
        let err = ServiceError::from(RepositoryError::from(ApiError::new(409, "conflit")));

        assert!(matches!(
            err,
            ServiceError::Api(api) if api.code == 409 && api.message == "conflit"
        ));
    }

    #[test]
    fn transport_errors_stay_repository_errors() {
        let err = ServiceError::from(RepositoryError::Timeout("slow".to_string()));

        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::Timeout(_))
        ));
    }
}
