//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ReviewStatusKind;
use crate::value_objects::{RestaurantId, ReviewId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid {category} rating {value}: must be between 0 and 5")]
    InvalidRating { category: &'static str, value: f64 },

    #[error("Missing {0} rating")]
    MissingRating(&'static str),

    #[error("Visit date cannot be in the future")]
    FutureVisitDate,

    #[error("Too many images: max {max}")]
    TooManyImages { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not review author")]
    NotReviewAuthor,

    // =========================================================================
    // State Machine Violations
    // =========================================================================
    #[error("Invalid review transition: {from} -> {to}")]
    InvalidTransition {
        from: ReviewStatusKind,
        to: ReviewStatusKind,
    },

    #[error("Review is {0} and can no longer be changed by its author")]
    ReviewLocked(ReviewStatusKind),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::RestaurantNotFound(_) => "UNKNOWN_RESTAURANT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRating { .. } => "INVALID_RATING",
            Self::MissingRating(_) => "MISSING_RATING",
            Self::FutureVisitDate => "FUTURE_VISIT_DATE",
            Self::TooManyImages { .. } => "TOO_MANY_IMAGES",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotReviewAuthor => "NOT_REVIEW_AUTHOR",

            // State machine
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ReviewLocked(_) => "REVIEW_LOCKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReviewNotFound(_) | Self::RestaurantNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRating { .. }
                | Self::MissingRating(_)
                | Self::FutureVisitDate
                | Self::TooManyImages { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_) | Self::NotReviewAuthor)
    }

    /// Check if this is a state machine violation
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. } | Self::ReviewLocked(_))
    }
}
