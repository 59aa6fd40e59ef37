//! Rating aggregator
//!
//! Pure functions that turn category ratings into an overall score, approved
//! reviews into restaurant statistics, and restaurant summaries into ranked
//! lists. Nothing here touches storage.

mod ranking;
mod stats;

pub use ranking::{rank_featured, rank_top_rated};
pub use stats::{restaurant_stats, RestaurantStats, StarBucket};

use crate::error::DomainError;
use crate::value_objects::CategoryRatings;

/// Lowest star bucket
pub const MIN_STARS: u8 = 1;

/// Highest star bucket
pub const MAX_STARS: u8 = 5;

// Means such as 3.4999999999999996 are treated as exact halves; the nudge
// is a few ULPs of the value, so genuinely smaller means keep rounding down.
const HALF_NUDGE_ULPS: f64 = 4.0;

/// Overall rating of a set of category ratings
///
/// Fails with `InvalidRating` when any category is outside `[0, 5]` or not finite.
pub fn overall_rating(ratings: &CategoryRatings) -> Result<f64, DomainError> {
    ratings.validate()?;
    Ok(ratings.mean())
}

/// Star bucket of an overall rating: round half up, clamped to `1..=5`
pub fn bucket(overall: f64) -> u8 {
    let nudge = overall.abs() * f64::EPSILON * HALF_NUDGE_ULPS;
    let rounded = (overall + 0.5 + nudge).floor();
    if rounded.is_nan() {
        return MIN_STARS;
    }
    rounded.clamp(f64::from(MIN_STARS), f64::from(MAX_STARS)) as u8
}
