//! Domain entities - core business objects

mod reaction;
mod restaurant;
mod review;

use serde::Serialize;

pub use reaction::{Reaction, ReactionKind, ReactionTally};
pub use restaurant::{Award, NewRestaurant, Restaurant, RestaurantPatch, RestaurantSummary};
pub use review::{
    ModerationDecision, NewReview, Review, ReviewPatch, ReviewStatus, ReviewStatusKind,
    MAX_IMAGES,
};

/// Number of reviews per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected
    }
}
