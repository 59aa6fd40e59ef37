//! Entity to model mappers
//!
//! Conversions between domain entities (review-core) and database models.
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects,
//!   rejecting rows that violate domain invariants
//! - `*Columns` structs: flatten entity data for database writes

mod moderator;
mod reaction;
mod restaurant;
mod review;

pub use restaurant::{restaurant_from_parts, RestaurantDetails};
pub use review::{status_counts, ReviewColumns};
