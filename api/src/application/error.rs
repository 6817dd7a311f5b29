use crate::application::integrity::{CheckError, ReferenceError};
use crate::application::ports::store_error::StoreError;
use crate::domain::validation::ValidationError;

/// Outcome taxonomy shared by every use case. All variants end the operation.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("Database connection is not available")]
    StoreUnavailable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ServiceError::Forbidden(message.into())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::BadRequest(err.message)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => {
                ServiceError::Conflict(format!("A record with this {} already exists", field))
            }
            StoreError::Backend(e) => ServiceError::Internal(e),
        }
    }
}

impl From<CheckError> for ServiceError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Reference(r) => ServiceError::Reference(r),
            CheckError::Store(e) => ServiceError::Internal(e),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
