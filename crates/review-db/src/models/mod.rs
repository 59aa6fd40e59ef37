//! Database models - SQLx-compatible structs for PostgreSQL tables

mod moderator;
mod reaction;
mod restaurant;
mod review;

pub use moderator::ModeratorModel;
pub use reaction::{ReactionModel, ReactionTallyModel};
pub use restaurant::{AwardModel, HighlightModel, RestaurantModel, RestaurantSummaryModel};
pub use review::{ReviewModel, StatusCountModel};
