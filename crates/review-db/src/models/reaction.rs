//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for review_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub review_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Reaction counts of one review (from query)
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionTallyModel {
    pub helpful: i64,
    pub unhelpful: i64,
}
