//! Restaurant statistics and rankings
//!
//! Nothing is cached: every call recomputes from the approved reviews or the
//! per-restaurant summaries, so results always reflect committed moderation.

use tracing::instrument;

use review_core::aggregate::{rank_featured, rank_top_rated, restaurant_stats, RestaurantStats};
use review_core::value_objects::RestaurantId;
use review_core::DomainError;

use crate::dto::RestaurantSummaryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate statistics of an active restaurant
    #[instrument(skip(self))]
    pub async fn get_stats(&self, restaurant_id: RestaurantId) -> ServiceResult<RestaurantStats> {
        match self.ctx.restaurant_repo().find_by_id(restaurant_id).await? {
            Some(restaurant) if restaurant.is_active => self.stats_for(restaurant_id).await,
            _ => Err(DomainError::RestaurantNotFound(restaurant_id).into()),
        }
    }

    /// Featured restaurants ordered by rating
    #[instrument(skip(self))]
    pub async fn get_featured(&self, limit: usize) -> ServiceResult<Vec<RestaurantSummaryResponse>> {
        let summaries = self.ctx.restaurant_repo().summaries().await?;
        Ok(rank_featured(summaries, limit)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Best rated restaurants with at least `min_reviews` approved reviews
    ///
    /// `min_reviews` falls back to the configured threshold.
    #[instrument(skip(self))]
    pub async fn get_top_rated(
        &self,
        limit: usize,
        min_reviews: Option<i64>,
    ) -> ServiceResult<Vec<RestaurantSummaryResponse>> {
        let min_reviews = min_reviews.unwrap_or(self.ctx.settings().top_rated_min_reviews);
        let summaries = self.ctx.restaurant_repo().summaries().await?;
        Ok(rank_top_rated(summaries, min_reviews, limit)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Statistics without the active check; callers have already resolved the restaurant
    pub(crate) async fn stats_for(&self, restaurant_id: RestaurantId) -> ServiceResult<RestaurantStats> {
        let reviews = self
            .ctx
            .review_repo()
            .find_approved_by_restaurant(restaurant_id)
            .await?;
        Ok(restaurant_stats(&reviews))
    }
}
