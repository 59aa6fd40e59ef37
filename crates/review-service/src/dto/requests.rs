//! Request DTOs for API endpoints
//!
//! All body DTOs implement `Deserialize` and `Validate` for shape checks.
//! Domain rules (rating range, visit date, image count) are enforced again
//! when the DTO is converted into its domain input.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use review_core::entities::{
    Award, ModerationDecision, NewRestaurant, NewReview, ReactionKind, RestaurantPatch,
    ReviewPatch,
};
use review_core::error::DomainError;
use review_core::traits::{Page, RestaurantQuery, RestaurantSort, ReviewQuery, ReviewSort};
use review_core::value_objects::{ModeratorRole, RatingsPatch, UserId};

// ============================================================================
// Review Requests
// ============================================================================

/// Create review request
///
/// `ratings` is deserialized leniently so that a missing category surfaces
/// as `MISSING_RATING` rather than a generic JSON error.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,

    #[serde(default)]
    pub ratings: RatingsPatch,

    pub visit_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    pub images: Vec<String>,
}

impl CreateReviewRequest {
    /// Convert into domain input, validating it against `today`
    pub fn into_new_review(self, today: NaiveDate) -> Result<NewReview, DomainError> {
        let review = NewReview {
            title: self.title,
            content: self.content,
            ratings: self.ratings.into_complete()?,
            visit_date: self.visit_date,
            images: self.images,
        };
        review.validate(today)?;
        Ok(review)
    }
}

/// Update review request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,

    #[serde(default)]
    pub ratings: RatingsPatch,

    /// Absent leaves the date unchanged; `null` clears it
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub visit_date: Option<Option<NaiveDate>>,

    #[validate(length(max = 10, message = "At most 10 images are allowed"))]
    pub images: Option<Vec<String>>,
}

impl From<UpdateReviewRequest> for ReviewPatch {
    fn from(request: UpdateReviewRequest) -> Self {
        ReviewPatch {
            title: request.title,
            content: request.content,
            ratings: request.ratings,
            visit_date: request.visit_date,
            images: request.images,
        }
    }
}

/// Moderation decision request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ModerateReviewRequest {
    pub decision: ModerationDecision,
}

/// Set reaction request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct SetReactionRequest {
    pub kind: ReactionKind,
}

/// Moderator role assignment request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AssignRoleRequest {
    pub role: ModeratorRole,
}

/// Sort order accepted by review listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    RatingDesc,
    RatingAsc,
    Helpful,
}

impl From<SortOrder> for ReviewSort {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Newest => ReviewSort::Newest,
            SortOrder::RatingDesc => ReviewSort::RatingDesc,
            SortOrder::RatingAsc => ReviewSort::RatingAsc,
            SortOrder::Helpful => ReviewSort::Helpful,
        }
    }
}

/// Filters of a restaurant's review listing (query string)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewListQuery {
    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    pub min_rating: Option<f64>,

    pub author_id: Option<i64>,

    #[serde(default)]
    pub sort: SortOrder,
}

impl ReviewListQuery {
    pub fn into_query(self, page: Page) -> ReviewQuery {
        ReviewQuery {
            min_rating: self.min_rating,
            author_id: self.author_id.map(UserId::new),
            sort: self.sort.into(),
            page,
        }
    }
}

// ============================================================================
// Restaurant Requests
// ============================================================================

/// Ranking list parameters (query string)
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct RankingQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    #[validate(range(min = 0, message = "min_reviews must not be negative"))]
    pub min_reviews: Option<i64>,
}

impl RankingQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT) as usize
    }
}

/// Sort order accepted by the restaurant catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    #[default]
    Newest,
    Rating,
    Reviews,
    Name,
}

impl From<CatalogSort> for RestaurantSort {
    fn from(order: CatalogSort) -> Self {
        match order {
            CatalogSort::Newest => RestaurantSort::Newest,
            CatalogSort::Rating => RestaurantSort::Rating,
            CatalogSort::Reviews => RestaurantSort::Reviews,
            CatalogSort::Name => RestaurantSort::Name,
        }
    }
}

/// Restaurant catalog filters (query string)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RestaurantListQuery {
    #[validate(length(min = 1, max = 100, message = "cuisine must be 1-100 characters"))]
    pub cuisine: Option<String>,

    #[validate(length(min = 1, max = 100, message = "city must be 1-100 characters"))]
    pub city: Option<String>,

    #[validate(range(min = 1, max = 4, message = "price_range must be between 1 and 4"))]
    pub price_range: Option<i16>,

    pub featured: Option<bool>,

    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    pub min_rating: Option<f64>,

    #[validate(length(min = 1, max = 100, message = "search must be 1-100 characters"))]
    pub search: Option<String>,

    #[serde(default)]
    pub sort: CatalogSort,
}

impl RestaurantListQuery {
    pub fn into_query(self, page: Page) -> RestaurantQuery {
        RestaurantQuery {
            cuisine: self.cuisine,
            city: self.city,
            price_range: self.price_range,
            featured: self.featured,
            min_rating: self.min_rating,
            search: self.search,
            sort: self.sort.into(),
            page,
        }
    }
}

/// Award attached to a new restaurant
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AwardRequest {
    #[validate(length(min = 1, max = 200, message = "Award name must be 1-200 characters"))]
    pub name: String,

    #[validate(range(min = 1900, max = 2100, message = "Award year must be between 1900 and 2100"))]
    pub year: Option<i32>,
}

/// Create restaurant request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Cuisine must be 1-100 characters"))]
    pub cuisine: String,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,

    #[validate(range(min = 1, max = 4, message = "Price range must be between 1 and 4"))]
    pub price_range: Option<i16>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub awards: Vec<AwardRequest>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub featured: bool,
}

impl CreateRestaurantRequest {
    /// Convert into domain input and validate it
    pub fn into_new_restaurant(self) -> Result<NewRestaurant, DomainError> {
        let restaurant = NewRestaurant {
            name: self.name,
            description: self.description,
            cuisine: self.cuisine,
            address: self.address,
            city: self.city,
            price_range: self.price_range,
            website: self.website,
            phone: self.phone,
            image_url: self.image_url,
            awards: into_awards(self.awards),
            highlights: self.highlights,
            featured: self.featured,
        };
        restaurant.validate()?;
        Ok(restaurant)
    }
}

fn into_awards(awards: Vec<AwardRequest>) -> Vec<Award> {
    awards
        .into_iter()
        .map(|a| Award {
            name: a.name,
            year: a.year,
        })
        .collect()
}

/// Update restaurant request
///
/// Absent fields are left unchanged; `null` clears an optional field.
/// `awards` and `highlights` replace the stored lists when present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRestaurantRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<Option<String>>,

    #[validate(length(min = 1, max = 100, message = "Cuisine must be 1-100 characters"))]
    pub cuisine: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 500))]
    pub address: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 100))]
    pub city: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(range(min = 1, max = 4, message = "Price range must be between 1 and 4"))]
    pub price_range: Option<Option<i16>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 50))]
    pub phone: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<Option<String>>,

    #[validate(nested)]
    pub awards: Option<Vec<AwardRequest>>,

    pub highlights: Option<Vec<String>>,

    pub featured: Option<bool>,
}

impl From<UpdateRestaurantRequest> for RestaurantPatch {
    fn from(request: UpdateRestaurantRequest) -> Self {
        RestaurantPatch {
            name: request.name,
            description: request.description,
            cuisine: request.cuisine,
            address: request.address,
            city: request.city,
            price_range: request.price_range,
            website: request.website,
            phone: request.phone,
            image_url: request.image_url,
            awards: request.awards.map(into_awards),
            highlights: request.highlights,
            featured: request.featured,
        }
    }
}
