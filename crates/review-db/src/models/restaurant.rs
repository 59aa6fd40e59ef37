//! Restaurant database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for restaurants table
#[derive(Debug, Clone, FromRow)]
pub struct RestaurantModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price_range: Option<i16>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for restaurant_awards table
#[derive(Debug, Clone, FromRow)]
pub struct AwardModel {
    pub restaurant_id: i64,
    pub position: i32,
    pub name: String,
    pub year: Option<i32>,
}

/// Database model for restaurant_highlights table
#[derive(Debug, Clone, FromRow)]
pub struct HighlightModel {
    pub restaurant_id: i64,
    pub position: i32,
    pub highlight: String,
}

/// Restaurant joined with its approved-review aggregate (from query)
#[derive(Debug, Clone, FromRow)]
pub struct RestaurantSummaryModel {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub city: Option<String>,
    pub featured: bool,
    pub average_rating: f64,
    pub review_count: i64,
}
