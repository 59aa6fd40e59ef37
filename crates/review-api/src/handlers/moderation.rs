//! Moderation handlers
//!
//! Pending queue, dashboard and moderator role management.

use axum::{extract::State, Json};
use review_service::dto::{
    ApiResponse, AssignRoleRequest, DashboardResponse, ModeratorResponse, PaginatedResponse,
    ReviewResponse,
};
use review_service::ModerationService;

use crate::extractors::{CurrentActor, Pagination, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Pending reviews, oldest first
///
/// GET /moderation/queue?page=&limit=
pub async fn pending_queue(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<ReviewResponse>>> {
    let service = ModerationService::new(state.service_context());
    let queue = service.pending_queue(&actor, page).await?;
    Ok(Json(queue))
}

/// Moderation dashboard
///
/// GET /moderation/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> ApiResult<Json<ApiResponse<DashboardResponse>>> {
    let service = ModerationService::new(state.service_context());
    let dashboard = service.dashboard(&actor).await?;
    Ok(Json(ApiResponse::new(dashboard)))
}

/// Grant a moderator role
///
/// PUT /moderation/moderators/{user_id}
pub async fn assign_role(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    UserIdPath(user_id): UserIdPath,
    ValidatedJson(request): ValidatedJson<AssignRoleRequest>,
) -> ApiResult<Json<ApiResponse<ModeratorResponse>>> {
    let service = ModerationService::new(state.service_context());
    let moderator = service.assign_role(&actor, user_id, request.role).await?;
    Ok(Json(ApiResponse::new(moderator)))
}
