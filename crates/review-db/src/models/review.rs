//! Review database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for reviews table
///
/// `overall_rating` is a generated column and is intentionally not mapped;
/// the entity derives it from the five category columns.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub restaurant_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub food_rating: f64,
    pub taste_rating: f64,
    pub ambiance_rating: f64,
    pub creativity_rating: f64,
    pub uniqueness_rating: f64,
    pub status: String,
    pub moderated_by: Option<i64>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
    pub images: Json<Vec<String>>,
    pub visit_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review count per status (from query)
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountModel {
    pub status: String,
    pub count: i64,
}
