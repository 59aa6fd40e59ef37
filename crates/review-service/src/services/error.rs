//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use review_common::AppError;
use review_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Application error (identity, configuration)
    #[error(transparent)]
    App(#[from] AppError),
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() || e.is_invalid_transition() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
