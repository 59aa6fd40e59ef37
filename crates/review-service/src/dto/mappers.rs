//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use review_core::entities::{Restaurant, RestaurantSummary, Review};
use review_core::traits::Paginated;

use super::responses::{
    PaginatedResponse, PaginationMeta, RestaurantResponse, RestaurantSummaryResponse,
    ReviewResponse,
};

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            restaurant_id: review.restaurant_id,
            author_id: review.author_id,
            title: review.title.clone(),
            content: review.content.clone(),
            ratings: review.ratings,
            overall_rating: review.overall_rating(),
            status: review.status.kind(),
            moderated_by: review.status.moderated_by(),
            moderated_at: review.status.moderated_at(),
            helpful_count: review.helpful_count,
            unhelpful_count: review.unhelpful_count,
            images: review.images.clone(),
            visit_date: review.visit_date,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

// ============================================================================
// Restaurant Mappers
// ============================================================================

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            description: restaurant.description,
            cuisine: restaurant.cuisine,
            address: restaurant.address,
            city: restaurant.city,
            price_range: restaurant.price_range,
            website: restaurant.website,
            phone: restaurant.phone,
            image_url: restaurant.image_url,
            awards: restaurant.awards,
            highlights: restaurant.highlights,
            featured: restaurant.featured,
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}

impl From<RestaurantSummary> for RestaurantSummaryResponse {
    fn from(summary: RestaurantSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            cuisine: summary.cuisine,
            city: summary.city,
            featured: summary.featured,
            average_rating: summary.average_rating,
            review_count: summary.review_count,
        }
    }
}

// ============================================================================
// Pagination Mappers
// ============================================================================

impl<T, U> From<Paginated<T>> for PaginatedResponse<U>
where
    U: From<T>,
{
    fn from(page: Paginated<T>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages(),
        };
        Self {
            data: page.items.into_iter().map(U::from).collect(),
            pagination,
        }
    }
}
