//! Restaurant catalog service

use chrono::Utc;
use tracing::{info, instrument};

use review_core::entities::Restaurant;
use review_core::traits::RestaurantQuery;
use review_core::value_objects::{Actor, ModeratorPermissions, RestaurantId};
use review_core::DomainError;

use crate::dto::{
    CreateRestaurantRequest, PaginatedResponse, RestaurantDetailResponse, RestaurantResponse,
    RestaurantSummaryResponse, UpdateRestaurantRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::stats::StatsService;

/// Restaurant service
pub struct RestaurantService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RestaurantService<'a> {
    /// Create a new RestaurantService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a restaurant with its awards and highlights
    #[instrument(skip(self, request), fields(user_id = %actor.user_id, name = %request.name))]
    pub async fn create_restaurant(
        &self,
        actor: &Actor,
        request: CreateRestaurantRequest,
    ) -> ServiceResult<RestaurantResponse> {
        actor.require(ModeratorPermissions::MANAGE_RESTAURANTS)?;

        let new_restaurant = request.into_new_restaurant()?;

        let mut tx = self.ctx.uow().begin().await?;
        let restaurant = tx.insert_restaurant(&new_restaurant).await?;
        tx.commit().await?;

        info!(
            restaurant_id = %restaurant.id,
            cuisine = %restaurant.cuisine,
            created_by = %actor.user_id,
            "Restaurant created"
        );

        Ok(RestaurantResponse::from(restaurant))
    }

    /// Restaurant details with freshly computed statistics
    #[instrument(skip(self))]
    pub async fn get_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> ServiceResult<RestaurantDetailResponse> {
        let restaurant = self.find_active(restaurant_id).await?;
        let stats = StatsService::new(self.ctx).stats_for(restaurant_id).await?;

        Ok(RestaurantDetailResponse {
            restaurant: restaurant.into(),
            stats,
        })
    }

    /// Edit a restaurant; awards and highlights are replaced in the same transaction
    #[instrument(skip(self, request), fields(user_id = %actor.user_id))]
    pub async fn update_restaurant(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
        request: UpdateRestaurantRequest,
    ) -> ServiceResult<RestaurantResponse> {
        actor.require(ModeratorPermissions::MANAGE_RESTAURANTS)?;

        let mut tx = self.ctx.uow().begin().await?;
        let mut restaurant = match tx.lock_restaurant(restaurant_id).await? {
            Some(restaurant) if restaurant.is_active => restaurant,
            _ => return Err(DomainError::RestaurantNotFound(restaurant_id).into()),
        };

        restaurant.apply_patch(request.into(), Utc::now())?;
        tx.replace_restaurant(&restaurant).await?;
        tx.commit().await?;

        info!(
            restaurant_id = %restaurant_id,
            updated_by = %actor.user_id,
            "Restaurant updated"
        );

        Ok(RestaurantResponse::from(restaurant))
    }

    /// The catalog: active restaurants with their aggregates, filtered and paginated
    #[instrument(skip(self))]
    pub async fn list_restaurants(
        &self,
        query: RestaurantQuery,
    ) -> ServiceResult<PaginatedResponse<RestaurantSummaryResponse>> {
        let page = self.ctx.restaurant_repo().find_filtered(&query).await?;
        Ok(page.into())
    }

    /// Active restaurants of a cuisine, case-insensitive
    #[instrument(skip(self))]
    pub async fn list_by_cuisine(&self, cuisine: &str) -> ServiceResult<Vec<RestaurantResponse>> {
        let restaurants = self.ctx.restaurant_repo().find_by_cuisine(cuisine).await?;
        Ok(restaurants.into_iter().map(RestaurantResponse::from).collect())
    }

    /// Flip the featured flag
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn toggle_featured(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
    ) -> ServiceResult<RestaurantResponse> {
        actor.require(ModeratorPermissions::MANAGE_RESTAURANTS)?;

        let restaurant = self.find_active(restaurant_id).await?;
        let featured = !restaurant.featured;
        if !self
            .ctx
            .restaurant_repo()
            .set_featured(restaurant_id, featured)
            .await?
        {
            return Err(DomainError::RestaurantNotFound(restaurant_id).into());
        }

        info!(restaurant_id = %restaurant_id, featured, "Restaurant featured flag changed");

        let restaurant = self.find_active(restaurant_id).await?;
        Ok(RestaurantResponse::from(restaurant))
    }

    /// Soft-delete a restaurant; its reviews stay stored but are no longer listed
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn deactivate(&self, actor: &Actor, restaurant_id: RestaurantId) -> ServiceResult<()> {
        actor.require(ModeratorPermissions::MANAGE_RESTAURANTS)?;

        if !self.ctx.restaurant_repo().deactivate(restaurant_id).await? {
            return Err(DomainError::RestaurantNotFound(restaurant_id).into());
        }

        info!(restaurant_id = %restaurant_id, "Restaurant deactivated");
        Ok(())
    }

    async fn find_active(&self, restaurant_id: RestaurantId) -> ServiceResult<Restaurant> {
        match self.ctx.restaurant_repo().find_by_id(restaurant_id).await? {
            Some(restaurant) if restaurant.is_active => Ok(restaurant),
            _ => Err(DomainError::RestaurantNotFound(restaurant_id).into()),
        }
    }
}
