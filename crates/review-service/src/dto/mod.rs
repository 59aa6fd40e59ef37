//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AssignRoleRequest, AwardRequest, CatalogSort, CreateRestaurantRequest, CreateReviewRequest,
    ModerateReviewRequest, RankingQuery, RestaurantListQuery, ReviewListQuery, SetReactionRequest,
    SortOrder, UpdateRestaurantRequest, UpdateReviewRequest,
};

pub use responses::{
    ApiResponse, DashboardResponse, HealthChecks, HealthResponse, ModeratorResponse,
    PaginatedResponse, PaginationMeta, ReactionResponse, ReadinessResponse,
    RestaurantDetailResponse, RestaurantResponse, RestaurantSummaryResponse, ReviewResponse,
};
