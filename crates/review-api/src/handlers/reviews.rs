//! Review handlers
//!
//! Endpoints for the review lifecycle.

use axum::{extract::State, Json};
use review_service::dto::{
    ApiResponse, CreateReviewRequest, ModerateReviewRequest, PaginatedResponse, ReviewListQuery,
    ReviewResponse, UpdateReviewRequest,
};
use review_service::ReviewService;

use crate::extractors::{
    CurrentActor, MaybeActor, Pagination, RestaurantIdPath, ReviewIdPath, UserIdPath,
    ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List approved reviews of a restaurant
///
/// GET /restaurants/{restaurant_id}/reviews?page=&limit=&min_rating=&author_id=&sort=
pub async fn list_restaurant_reviews(
    State(state): State<AppState>,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
    Pagination(page): Pagination,
    ValidatedQuery(filters): ValidatedQuery<ReviewListQuery>,
) -> ApiResult<Json<PaginatedResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let reviews = service
        .list_restaurant_reviews(restaurant_id, filters.into_query(page))
        .await?;
    Ok(Json(reviews))
}

/// Submit a review
///
/// POST /restaurants/{restaurant_id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ApiResponse<ReviewResponse>>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.create_review(&actor, restaurant_id, request).await?;
    Ok(Created(Json(ApiResponse::new(review))))
}

/// Get review by ID; unpublished reviews only for their author and moderators
///
/// GET /reviews/{review_id}
pub async fn get_review(
    State(state): State<AppState>,
    MaybeActor(viewer): MaybeActor,
    ReviewIdPath(review_id): ReviewIdPath,
) -> ApiResult<Json<ApiResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.get_review(viewer.as_ref(), review_id).await?;
    Ok(Json(ApiResponse::new(review)))
}

/// Edit own review
///
/// PATCH /reviews/{review_id}
pub async fn update_review(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<Json<ApiResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.update_review(&actor, review_id, request).await?;
    Ok(Json(ApiResponse::new(review)))
}

/// Delete review
///
/// DELETE /reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service.delete_review(&actor, review_id).await?;
    Ok(NoContent)
}

/// Approve or reject a pending review
///
/// POST /reviews/{review_id}/moderate
pub async fn moderate_review(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
    ValidatedJson(request): ValidatedJson<ModerateReviewRequest>,
) -> ApiResult<Json<ApiResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let review = service.moderate_review(&actor, review_id, request).await?;
    Ok(Json(ApiResponse::new(review)))
}

/// Reviews written by a user; approved only unless the caller is the
/// author or a moderator
///
/// GET /users/{user_id}/reviews
pub async fn list_user_reviews(
    State(state): State<AppState>,
    MaybeActor(viewer): MaybeActor,
    UserIdPath(user_id): UserIdPath,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let reviews = service
        .list_author_reviews(viewer.as_ref(), user_id, page)
        .await?;
    Ok(Json(reviews))
}
