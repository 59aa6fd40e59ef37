//! Value objects - immutable types that represent domain concepts

mod actor;
mod ids;
mod permissions;
mod ratings;

pub use actor::Actor;
pub use ids::{IdParseError, RestaurantId, ReviewId, UserId};
pub use permissions::{ModeratorPermissions, ModeratorRole};
pub use ratings::{CategoryRatings, RatingCategory, RatingsPatch, MAX_RATING, MIN_RATING};
