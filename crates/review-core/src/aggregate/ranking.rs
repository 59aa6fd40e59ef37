//! Ordering policies for restaurant lists

use std::cmp::Ordering;

use crate::entities::RestaurantSummary;

// Average desc, then review count desc, then id asc.
fn by_rating(a: &RestaurantSummary, b: &RestaurantSummary) -> Ordering {
    b.average_rating
        .total_cmp(&a.average_rating)
        .then_with(|| b.review_count.cmp(&a.review_count))
        .then_with(|| a.id.cmp(&b.id))
}

/// Restaurants with at least `min_reviews` approved reviews, best first
pub fn rank_top_rated(
    summaries: Vec<RestaurantSummary>,
    min_reviews: i64,
    limit: usize,
) -> Vec<RestaurantSummary> {
    let mut ranked: Vec<_> = summaries
        .into_iter()
        .filter(|s| s.review_count >= min_reviews)
        .collect();
    ranked.sort_by(by_rating);
    ranked.truncate(limit);
    ranked
}

/// Featured restaurants, best first
pub fn rank_featured(summaries: Vec<RestaurantSummary>, limit: usize) -> Vec<RestaurantSummary> {
    let mut ranked: Vec<_> = summaries.into_iter().filter(|s| s.featured).collect();
    ranked.sort_by(by_rating);
    ranked.truncate(limit);
    ranked
}
