//! Moderation service
//!
//! The pending queue, the moderation dashboard and moderator role
//! management. Also resolves the permissions of a caller from its stored
//! role, which the HTTP layer does once per request.

use tracing::{info, instrument};

use review_core::aggregate::rank_top_rated;
use review_core::traits::Page;
use review_core::value_objects::{Actor, ModeratorPermissions, ModeratorRole, UserId};

use crate::dto::{DashboardResponse, ModeratorResponse, PaginatedResponse, ReviewResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

// Any restaurant with a single approved review may appear on the dashboard.
const DASHBOARD_MIN_REVIEWS: i64 = 1;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Actor for `user_id`, carrying the permissions of its moderator role (if any)
    #[instrument(skip(self))]
    pub async fn resolve_actor(&self, user_id: UserId) -> ServiceResult<Actor> {
        let role = self.ctx.moderator_repo().find_role(user_id).await?;
        Ok(Actor::with_role(user_id, role))
    }

    /// Pending reviews, oldest first
    #[instrument(skip(self), fields(moderator_id = %actor.user_id))]
    pub async fn pending_queue(
        &self,
        actor: &Actor,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<ReviewResponse>> {
        actor.require(ModeratorPermissions::MODERATE_REVIEWS)?;

        let pending = self.ctx.review_repo().find_pending(page).await?;
        Ok(pending.into())
    }

    /// Review counts per status and the best rated restaurants
    #[instrument(skip(self), fields(moderator_id = %actor.user_id))]
    pub async fn dashboard(&self, actor: &Actor) -> ServiceResult<DashboardResponse> {
        actor.require(ModeratorPermissions::MODERATE_REVIEWS)?;

        let review_counts = self.ctx.review_repo().count_by_status().await?;
        let summaries = self.ctx.restaurant_repo().summaries().await?;
        let top_restaurants = rank_top_rated(
            summaries,
            DASHBOARD_MIN_REVIEWS,
            self.ctx.settings().dashboard_top_restaurants,
        );

        Ok(DashboardResponse {
            total_reviews: review_counts.total(),
            review_counts,
            top_restaurants: top_restaurants.into_iter().map(Into::into).collect(),
        })
    }

    /// Grant `role` to `user_id`; only super admins may
    #[instrument(skip(self), fields(granted_by = %actor.user_id))]
    pub async fn assign_role(
        &self,
        actor: &Actor,
        user_id: UserId,
        role: ModeratorRole,
    ) -> ServiceResult<ModeratorResponse> {
        actor.require(ModeratorPermissions::ALL)?;

        self.ctx.moderator_repo().assign_role(user_id, role).await?;

        info!(
            user_id = %user_id,
            role = role.as_str(),
            granted_by = %actor.user_id,
            "Moderator role assigned"
        );

        Ok(ModeratorResponse {
            user_id,
            role,
            permissions: role.permissions(),
        })
    }
}
