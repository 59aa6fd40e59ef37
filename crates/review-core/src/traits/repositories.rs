//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Reads go through these traits; every
//! multi-row write goes through a [`Transaction`](super::Transaction).

use async_trait::async_trait;
use serde::Serialize;

use crate::entities::{NewReview, Reaction, Restaurant, RestaurantSummary, Review, StatusCounts};
use crate::error::DomainError;
use crate::value_objects::{ModeratorRole, RestaurantId, ReviewId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pagination
// ============================================================================

/// Page/limit pagination, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Create a page; zero values are raised to 1
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// One page of results plus the total size of the result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            items,
            total,
            page: page.page,
            limit: page.limit,
        }
    }

    /// Number of pages needed for `total` rows
    pub fn total_pages(&self) -> i64 {
        let limit = i64::from(self.limit.max(1));
        (self.total + limit - 1) / limit
    }

    /// Convert the items, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Review Repository
// ============================================================================

/// Sort order for restaurant review listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    #[default]
    Newest,
    RatingDesc,
    RatingAsc,
    Helpful,
}

/// Filters for listing a restaurant's approved reviews
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    /// Minimum overall rating, inclusive
    pub min_rating: Option<f64>,
    pub author_id: Option<UserId>,
    pub sort: ReviewSort,
    pub page: Page,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;

    /// All approved reviews of a restaurant (input to the aggregator)
    async fn find_approved_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<Review>>;

    /// Page through a restaurant's approved reviews
    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
        query: &ReviewQuery,
    ) -> RepoResult<Paginated<Review>>;

    /// Page through an author's reviews, newest first; every status unless
    /// `approved_only` is set
    async fn find_by_author(
        &self,
        author_id: UserId,
        approved_only: bool,
        page: Page,
    ) -> RepoResult<Paginated<Review>>;

    /// Page through pending reviews, oldest first
    async fn find_pending(&self, page: Page) -> RepoResult<Paginated<Review>>;

    /// Insert a validated review in pending status
    async fn create(
        &self,
        restaurant_id: RestaurantId,
        author_id: UserId,
        review: &NewReview,
    ) -> RepoResult<Review>;

    /// Count reviews per status
    async fn count_by_status(&self) -> RepoResult<StatusCounts>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's reaction on a review
    async fn find(&self, review_id: ReviewId, user_id: UserId) -> RepoResult<Option<Reaction>>;
}

// ============================================================================
// Restaurant Repository
// ============================================================================

/// Sort order for the restaurant catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestaurantSort {
    /// Most recently added first
    #[default]
    Newest,
    /// Highest average rating first, ties broken by review count
    Rating,
    /// Most approved reviews first
    Reviews,
    Name,
}

/// Filters for the restaurant catalog; only active restaurants are listed
///
/// `cuisine` and `city` match case-insensitively. `search` is a
/// case-insensitive substring of the name, description or cuisine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantQuery {
    pub cuisine: Option<String>,
    pub city: Option<String>,
    pub price_range: Option<i16>,
    pub featured: Option<bool>,
    /// Minimum average approved rating, inclusive
    pub min_rating: Option<f64>,
    pub search: Option<String>,
    pub sort: RestaurantSort,
    pub page: Page,
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Find restaurant by ID, active or not
    async fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;

    /// Active restaurants of a cuisine (case-insensitive), by name
    async fn find_by_cuisine(&self, cuisine: &str) -> RepoResult<Vec<Restaurant>>;

    /// Page through active restaurants with their aggregates
    async fn find_filtered(
        &self,
        query: &RestaurantQuery,
    ) -> RepoResult<Paginated<RestaurantSummary>>;

    /// Approved-review aggregates of every active restaurant
    async fn summaries(&self) -> RepoResult<Vec<RestaurantSummary>>;

    /// Set the featured flag; returns false if no active restaurant matched
    async fn set_featured(&self, id: RestaurantId, featured: bool) -> RepoResult<bool>;

    /// Soft delete; returns false if no active restaurant matched
    async fn deactivate(&self, id: RestaurantId) -> RepoResult<bool>;
}

// ============================================================================
// Moderator Repository
// ============================================================================

#[async_trait]
pub trait ModeratorRepository: Send + Sync {
    /// Role held by a user, if any
    async fn find_role(&self, user_id: UserId) -> RepoResult<Option<ModeratorRole>>;

    /// Grant or replace a user's role
    async fn assign_role(&self, user_id: UserId, role: ModeratorRole) -> RepoResult<()>;
}
