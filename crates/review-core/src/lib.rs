//! # review-core
//!
//! Domain layer containing review entities, the rating aggregator, the review
//! state machine, and the repository/transaction traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod aggregate;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregate::{
    bucket, overall_rating, rank_featured, rank_top_rated, restaurant_stats, RestaurantStats,
    StarBucket,
};
pub use entities::{
    Award, ModerationDecision, NewRestaurant, NewReview, Reaction, ReactionKind, ReactionTally,
    Restaurant, RestaurantSummary, Review, ReviewPatch, ReviewStatus, ReviewStatusKind,
    StatusCounts,
};
pub use error::DomainError;
pub use traits::{
    ModeratorRepository, Page, Paginated, ReactionRepository, RepoResult, RestaurantRepository,
    ReviewQuery, ReviewRepository, ReviewSort, Transaction, UnitOfWork,
};
pub use value_objects::{
    Actor, CategoryRatings, IdParseError, ModeratorPermissions, ModeratorRole, RatingCategory,
    RatingsPatch, RestaurantId, ReviewId, UserId,
};
