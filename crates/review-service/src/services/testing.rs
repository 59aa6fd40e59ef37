//! Shared fixtures for service tests

use review_core::entities::ModerationDecision;
use review_core::value_objects::{
    Actor, ModeratorRole, RatingsPatch, RestaurantId, ReviewId, UserId,
};
use review_db::MemoryStore;

use crate::dto::{CreateRestaurantRequest, CreateReviewRequest, ModerateReviewRequest};

use super::context::{ServiceContext, ServiceContextBuilder};
use super::restaurant::RestaurantService;
use super::review::ReviewService;

pub fn test_context() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .build()
        .unwrap();
    (ctx, store)
}

pub fn moderator() -> Actor {
    Actor::with_role(UserId::new(900), Some(ModeratorRole::Admin))
}

pub fn super_admin() -> Actor {
    Actor::with_role(UserId::new(901), Some(ModeratorRole::SuperAdmin))
}

pub fn create_request(ratings: [f64; 5]) -> CreateReviewRequest {
    let [food, taste, ambiance, creativity, uniqueness] = ratings;
    CreateReviewRequest {
        title: "Dinner".to_string(),
        content: "A memorable evening".to_string(),
        ratings: RatingsPatch {
            food: Some(food),
            taste: Some(taste),
            ambiance: Some(ambiance),
            creativity: Some(creativity),
            uniqueness: Some(uniqueness),
        },
        visit_date: None,
        images: vec![],
    }
}

pub fn restaurant_request(name: &str, cuisine: &str) -> CreateRestaurantRequest {
    CreateRestaurantRequest {
        name: name.to_string(),
        description: None,
        cuisine: cuisine.to_string(),
        address: None,
        city: Some("Lisbon".to_string()),
        price_range: Some(2),
        website: None,
        phone: None,
        image_url: None,
        awards: vec![],
        highlights: vec![],
        featured: false,
    }
}

pub async fn restaurant(ctx: &ServiceContext, name: &str, cuisine: &str) -> RestaurantId {
    RestaurantService::new(ctx)
        .create_restaurant(&super_admin(), restaurant_request(name, cuisine))
        .await
        .unwrap()
        .id
}

pub async fn approve(ctx: &ServiceContext, review_id: ReviewId) {
    ReviewService::new(ctx)
        .moderate_review(
            &moderator(),
            review_id,
            ModerateReviewRequest {
                decision: ModerationDecision::Approved,
            },
        )
        .await
        .unwrap();
}

/// Create and approve a review with uniform category ratings
pub async fn approved_review(
    ctx: &ServiceContext,
    restaurant_id: RestaurantId,
    author: u32,
    rating: f64,
) -> ReviewId {
    let review = ReviewService::new(ctx)
        .create_review(
            &Actor::user(UserId::new(i64::from(author))),
            restaurant_id,
            create_request([rating; 5]),
        )
        .await
        .unwrap();
    approve(ctx, review.id).await;
    review.id
}
