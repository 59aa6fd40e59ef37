//! Test fixtures and data generators
//!
//! Request bodies are plain JSON; responses are read back into the small
//! structs below, which mirror the public API shapes.

use serde::Deserialize;
use serde_json::{json, Value};

/// `{"data": ...}` envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

/// Review as returned by the API
#[derive(Debug, Deserialize)]
pub struct Review {
    pub id: i64,
    pub restaurant_id: i64,
    pub author_id: i64,
    pub title: String,
    pub overall_rating: f64,
    pub status: String,
    pub moderated_by: Option<i64>,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
}

/// Restaurant as returned by the API
#[derive(Debug, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub featured: bool,
}

/// Restaurant catalog and ranking entry
#[derive(Debug, Deserialize)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct StarBucket {
    pub stars: u8,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Deserialize)]
pub struct Stats {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub rating_distribution: Vec<StarBucket>,
}

/// Reaction state of a review for one user
#[derive(Debug, Deserialize)]
pub struct Reaction {
    pub kind: Option<String>,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
}

/// Create-restaurant body
pub fn restaurant_body(name: &str, cuisine: &str) -> Value {
    json!({
        "name": name,
        "cuisine": cuisine,
        "city": "Lisbon",
        "price_range": 2,
        "awards": [{"name": "Best Newcomer", "year": 2023}],
        "highlights": ["Terrace"]
    })
}

/// Create-review body with five category ratings
pub fn review_body(ratings: [f64; 5]) -> Value {
    let [food, taste, ambiance, creativity, uniqueness] = ratings;
    json!({
        "title": "Dinner",
        "content": "A memorable evening",
        "ratings": {
            "food": food,
            "taste": taste,
            "ambiance": ambiance,
            "creativity": creativity,
            "uniqueness": uniqueness
        }
    })
}

/// Moderation body
pub fn decision(decision: &str) -> Value {
    json!({ "decision": decision })
}
