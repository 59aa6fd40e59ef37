//! Moderator database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for moderators table
#[derive(Debug, Clone, FromRow)]
pub struct ModeratorModel {
    pub user_id: i64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
