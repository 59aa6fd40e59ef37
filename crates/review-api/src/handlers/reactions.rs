//! Reaction handlers
//!
//! The caller's helpful/unhelpful vote on a review.

use axum::{extract::State, Json};
use review_service::dto::{ApiResponse, ReactionResponse, SetReactionRequest};
use review_service::ReactionService;

use crate::extractors::{CurrentActor, ReviewIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get own reaction and the review's counters
///
/// GET /reviews/{review_id}/reaction
pub async fn get_reaction(
    State(state): State<AppState>,
    auth: CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
) -> ApiResult<Json<ApiResponse<ReactionResponse>>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service.get_reaction(review_id, auth.user_id()).await?;
    Ok(Json(ApiResponse::new(reaction)))
}

/// Set own reaction
///
/// PUT /reviews/{review_id}/reaction
pub async fn set_reaction(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ApiResponse<ReactionResponse>>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service.set_reaction(&actor, review_id, request.kind).await?;
    Ok(Json(ApiResponse::new(reaction)))
}

/// Remove own reaction
///
/// DELETE /reviews/{review_id}/reaction
pub async fn clear_reaction(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ReviewIdPath(review_id): ReviewIdPath,
) -> ApiResult<Json<ApiResponse<ReactionResponse>>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service.clear_reaction(&actor, review_id).await?;
    Ok(Json(ApiResponse::new(reaction)))
}
