//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use review_core::aggregate::RestaurantStats;
use review_core::entities::{Award, ReactionKind, ReviewStatusKind, StatusCounts};
use review_core::value_objects::{
    CategoryRatings, ModeratorPermissions, ModeratorRole, RestaurantId, ReviewId, UserId,
};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Page of results with offset pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

// ============================================================================
// Review Responses
// ============================================================================

/// Review response
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub restaurant_id: RestaurantId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub ratings: CategoryRatings,
    pub overall_rating: f64,
    pub status: ReviewStatusKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderated_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderated_at: Option<DateTime<Utc>>,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
    pub images: Vec<String>,
    pub visit_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reaction state of one review, as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionResponse {
    pub review_id: ReviewId,
    pub user_id: UserId,
    /// `None` when the caller has no reaction on the review
    pub kind: Option<ReactionKind>,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
}

// ============================================================================
// Restaurant Responses
// ============================================================================

/// Restaurant response
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantResponse {
    pub id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price_range: Option<i16>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub awards: Vec<Award>,
    pub highlights: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restaurant with freshly computed statistics
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetailResponse {
    #[serde(flatten)]
    pub restaurant: RestaurantResponse,
    pub stats: RestaurantStats,
}

/// Restaurant with its approved-review aggregate
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantSummaryResponse {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: String,
    pub city: Option<String>,
    pub featured: bool,
    pub average_rating: f64,
    pub review_count: i64,
}

// ============================================================================
// Moderation Responses
// ============================================================================

/// Moderation dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub review_counts: StatusCounts,
    pub total_reviews: i64,
    pub top_restaurants: Vec<RestaurantSummaryResponse>,
}

/// A moderator and the permissions its role grants
#[derive(Debug, Clone, Serialize)]
pub struct ModeratorResponse {
    pub user_id: UserId,
    pub role: ModeratorRole,
    pub permissions: ModeratorPermissions,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_serialization() {
        let response = ApiResponse::new("test");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"data":"test"}"#);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.storage, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.storage, "unhealthy");
    }

    #[test]
    fn test_reaction_response_without_kind() {
        let response = ReactionResponse {
            review_id: ReviewId::new(1),
            user_id: UserId::new(2),
            kind: None,
            helpful_count: 0,
            unhelpful_count: 0,
        };
        let json = serde_json::to_value(response).unwrap();
        assert!(json["kind"].is_null());
        assert_eq!(json["review_id"], 1);
    }
}
