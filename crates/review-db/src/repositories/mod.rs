//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in review-core.
//! Each repository handles database operations for a specific domain entity;
//! [`PgUnitOfWork`] provides the transactional write path.

mod error;
mod moderator;
mod reaction;
mod restaurant;
mod review;
mod unit_of_work;

pub use moderator::PgModeratorRepository;
pub use reaction::PgReactionRepository;
pub use restaurant::PgRestaurantRepository;
pub use review::PgReviewRepository;
pub use unit_of_work::{PgTransaction, PgUnitOfWork};
