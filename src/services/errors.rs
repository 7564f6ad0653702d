use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed payload, unknown references or a forbidden relation.
    #[error("{0}")]
    Validation(String),
    /// The relation being added already exists.
    #[error("{0}")]
    Conflict(String),
    #[error("not found")]
    NotFound,
    /// The action needs an authenticated identity.
    #[error("authentication required")]
    Unauthorized,
    /// The identity may not act on this resource.
    #[error("permission denied")]
    Forbidden,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::ForeignKey(message) => ServiceError::Validation(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
