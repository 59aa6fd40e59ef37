//! Restaurant handlers
//!
//! Endpoints for the restaurant catalog, statistics and rankings.

use axum::{extract::State, Json};
use review_core::aggregate::RestaurantStats;
use review_service::dto::{
    ApiResponse, CreateRestaurantRequest, PaginatedResponse, RankingQuery,
    RestaurantDetailResponse, RestaurantListQuery, RestaurantResponse, RestaurantSummaryResponse,
    UpdateRestaurantRequest,
};
use review_service::{RestaurantService, StatsService};

use crate::extractors::{
    CuisinePath, CurrentActor, Pagination, RestaurantIdPath, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Restaurant catalog
///
/// GET /restaurants?page=&limit=&cuisine=&city=&price_range=&featured=&min_rating=&search=&sort=
pub async fn list_restaurants(
    State(state): State<AppState>,
    Pagination(page): Pagination,
    ValidatedQuery(filters): ValidatedQuery<RestaurantListQuery>,
) -> ApiResult<Json<PaginatedResponse<RestaurantSummaryResponse>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurants = service.list_restaurants(filters.into_query(page)).await?;
    Ok(Json(restaurants))
}

/// Active restaurants of a cuisine, with full details
///
/// GET /restaurants/cuisine/{cuisine}
pub async fn list_by_cuisine(
    State(state): State<AppState>,
    CuisinePath(cuisine): CuisinePath,
) -> ApiResult<Json<ApiResponse<Vec<RestaurantResponse>>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurants = service.list_by_cuisine(&cuisine).await?;
    Ok(Json(ApiResponse::new(restaurants)))
}

/// Create restaurant
///
/// POST /restaurants
pub async fn create_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ValidatedJson(request): ValidatedJson<CreateRestaurantRequest>,
) -> ApiResult<Created<Json<ApiResponse<RestaurantResponse>>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurant = service.create_restaurant(&actor, request).await?;
    Ok(Created(Json(ApiResponse::new(restaurant))))
}

/// Get restaurant with its statistics
///
/// GET /restaurants/{restaurant_id}
pub async fn get_restaurant(
    State(state): State<AppState>,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
) -> ApiResult<Json<ApiResponse<RestaurantDetailResponse>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurant = service.get_restaurant(restaurant_id).await?;
    Ok(Json(ApiResponse::new(restaurant)))
}

/// Edit restaurant
///
/// PATCH /restaurants/{restaurant_id}
pub async fn update_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
    ValidatedJson(request): ValidatedJson<UpdateRestaurantRequest>,
) -> ApiResult<Json<ApiResponse<RestaurantResponse>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurant = service
        .update_restaurant(&actor, restaurant_id, request)
        .await?;
    Ok(Json(ApiResponse::new(restaurant)))
}

/// Deactivate restaurant
///
/// DELETE /restaurants/{restaurant_id}
pub async fn deactivate_restaurant(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
) -> ApiResult<NoContent> {
    let service = RestaurantService::new(state.service_context());
    service.deactivate(&actor, restaurant_id).await?;
    Ok(NoContent)
}

/// Toggle the featured flag
///
/// POST /restaurants/{restaurant_id}/featured
pub async fn toggle_featured(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
) -> ApiResult<Json<ApiResponse<RestaurantResponse>>> {
    let service = RestaurantService::new(state.service_context());
    let restaurant = service.toggle_featured(&actor, restaurant_id).await?;
    Ok(Json(ApiResponse::new(restaurant)))
}

/// Restaurant statistics
///
/// GET /restaurants/{restaurant_id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    RestaurantIdPath(restaurant_id): RestaurantIdPath,
) -> ApiResult<Json<ApiResponse<RestaurantStats>>> {
    let service = StatsService::new(state.service_context());
    let stats = service.get_stats(restaurant_id).await?;
    Ok(Json(ApiResponse::new(stats)))
}

/// Featured restaurants
///
/// GET /restaurants/featured?limit=
pub async fn get_featured(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RankingQuery>,
) -> ApiResult<Json<ApiResponse<Vec<RestaurantSummaryResponse>>>> {
    let service = StatsService::new(state.service_context());
    let restaurants = service.get_featured(query.limit()).await?;
    Ok(Json(ApiResponse::new(restaurants)))
}

/// Top rated restaurants
///
/// GET /restaurants/top-rated?limit=&min_reviews=
pub async fn get_top_rated(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RankingQuery>,
) -> ApiResult<Json<ApiResponse<Vec<RestaurantSummaryResponse>>>> {
    let service = StatsService::new(state.service_context());
    let restaurants = service
        .get_top_rated(query.limit(), query.min_reviews)
        .await?;
    Ok(Json(ApiResponse::new(restaurants)))
}
