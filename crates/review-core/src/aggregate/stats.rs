//! Restaurant statistics over approved reviews

use serde::Serialize;

use crate::entities::Review;
use crate::value_objects::CategoryRatings;

use super::{bucket, MAX_STARS, MIN_STARS};

/// Count and share of reviews in one star bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarBucket {
    pub stars: u8,
    pub count: i64,
    pub percentage: f64,
}

/// Computed aggregate view of a restaurant's approved reviews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantStats {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub category_averages: CategoryRatings,
    /// Buckets from 5 stars down to 1
    pub rating_distribution: Vec<StarBucket>,
}

impl RestaurantStats {
    /// Stats of a restaurant without approved reviews
    pub fn empty() -> Self {
        Self {
            total_reviews: 0,
            average_rating: 0.0,
            category_averages: CategoryRatings::default(),
            rating_distribution: (MIN_STARS..=MAX_STARS)
                .rev()
                .map(|stars| StarBucket {
                    stars,
                    count: 0,
                    percentage: 0.0,
                })
                .collect(),
        }
    }

    /// Look up a bucket by star value
    pub fn bucket(&self, stars: u8) -> Option<&StarBucket> {
        self.rating_distribution.iter().find(|b| b.stars == stars)
    }
}

/// Aggregate the approved reviews among `reviews`
///
/// Reviews in any other status are skipped, so callers cannot leak pending
/// or rejected ratings into public numbers.
pub fn restaurant_stats(reviews: &[Review]) -> RestaurantStats {
    let mut stats = RestaurantStats::empty();
    let mut overall_sum = 0.0;
    let mut category_sum = CategoryRatings::default();
    let mut counts = [0i64; MAX_STARS as usize];

    for review in reviews.iter().filter(|r| r.is_approved()) {
        let overall = review.overall_rating();
        overall_sum += overall;
        category_sum.accumulate(&review.ratings);
        counts[usize::from(bucket(overall) - MIN_STARS)] += 1;
        stats.total_reviews += 1;
    }

    if stats.total_reviews == 0 {
        return stats;
    }

    let total = stats.total_reviews as f64;
    stats.average_rating = overall_sum / total;
    stats.category_averages = category_sum.scaled_down(total);
    for entry in &mut stats.rating_distribution {
        let count = counts[usize::from(entry.stars - MIN_STARS)];
        entry.count = count;
        entry.percentage = count as f64 * 100.0 / total;
    }
    stats
}
