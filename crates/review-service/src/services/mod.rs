//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and receives the calling
//! [`Actor`](review_core::value_objects::Actor) explicitly on every write.

pub mod context;
pub mod error;
pub mod moderation;
pub mod reaction;
pub mod restaurant;
pub mod review;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use reaction::ReactionService;
pub use restaurant::RestaurantService;
pub use review::ReviewService;
pub use stats::StatsService;
