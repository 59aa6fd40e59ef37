//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, moderation, reactions, restaurants, reviews};
use crate::state::AppState;

/// Common prefix of every route
pub const API_PREFIX: &str = "/api/v1";

/// Health check routes (kept apart so they bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes, without the prefix
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(restaurant_routes())
        .merge(review_routes())
        .merge(moderation_routes())
}

/// Restaurant routes
fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants",
            get(restaurants::list_restaurants).post(restaurants::create_restaurant),
        )
        // Rankings (static segments win over :restaurant_id)
        .route("/restaurants/featured", get(restaurants::get_featured))
        .route("/restaurants/top-rated", get(restaurants::get_top_rated))
        .route("/restaurants/cuisine/:cuisine", get(restaurants::list_by_cuisine))
        .route(
            "/restaurants/:restaurant_id",
            get(restaurants::get_restaurant)
                .patch(restaurants::update_restaurant)
                .delete(restaurants::deactivate_restaurant),
        )
        .route("/restaurants/:restaurant_id/featured", post(restaurants::toggle_featured))
        .route("/restaurants/:restaurant_id/stats", get(restaurants::get_stats))
        // Restaurant reviews
        .route(
            "/restaurants/:restaurant_id/reviews",
            get(reviews::list_restaurant_reviews).post(reviews::create_review),
        )
}

/// Review routes
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews/:review_id",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/:review_id/moderate", post(reviews::moderate_review))
        .route(
            "/reviews/:review_id/reaction",
            get(reactions::get_reaction)
                .put(reactions::set_reaction)
                .delete(reactions::clear_reaction),
        )
        .route("/users/:user_id/reviews", get(reviews::list_user_reviews))
}

/// Moderation routes
fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/moderation/queue", get(moderation::pending_queue))
        .route("/moderation/dashboard", get(moderation::dashboard))
        .route("/moderation/moderators/:user_id", put(moderation::assign_role))
}
