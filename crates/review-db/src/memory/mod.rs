//! In-memory backend
//!
//! [`MemoryStore`] implements every repository trait plus [`UnitOfWork`] over
//! process-local maps. Transactions hold an owned lock on the whole store,
//! write in place and keep an undo log of the entries they touch; dropping an
//! uncommitted transaction replays that log. One transaction runs at a time,
//! so the store suits tests and single-node development, not production load.
//!
//! Listing orders mirror the `ORDER BY` clauses of the PostgreSQL queries.

mod transaction;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::instrument;

use review_core::entities::{
    NewReview, Reaction, Restaurant, RestaurantSummary, Review, ReviewStatusKind, StatusCounts,
};
use review_core::error::DomainError;
use review_core::traits::{
    ModeratorRepository, Page, Paginated, ReactionRepository, RepoResult, RestaurantQuery,
    RestaurantRepository, RestaurantSort, ReviewQuery, ReviewRepository, ReviewSort, Transaction,
    UnitOfWork,
};
use review_core::value_objects::{ModeratorRole, RestaurantId, ReviewId, UserId};

pub use transaction::MemoryTransaction;

/// Everything the store holds
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub restaurants: BTreeMap<RestaurantId, Restaurant>,
    pub reviews: BTreeMap<ReviewId, Review>,
    pub reactions: BTreeMap<(ReviewId, UserId), Reaction>,
    pub moderators: BTreeMap<UserId, ModeratorRole>,
    next_restaurant_id: i64,
    next_review_id: i64,
}

impl State {
    pub fn next_restaurant_id(&mut self) -> RestaurantId {
        self.next_restaurant_id += 1;
        RestaurantId::new(self.next_restaurant_id)
    }

    pub fn next_review_id(&mut self) -> ReviewId {
        self.next_review_id += 1;
        ReviewId::new(self.next_review_id)
    }

    pub fn reactions_of(&self, review_id: ReviewId) -> impl Iterator<Item = &Reaction> {
        self.reactions
            .range((review_id, UserId::new(i64::MIN))..=(review_id, UserId::new(i64::MAX)))
            .map(|(_, reaction)| reaction)
    }

    /// Active restaurants paired with their approved-review aggregate, by id
    fn catalog(&self) -> Vec<(&Restaurant, RestaurantSummary)> {
        let mut totals: BTreeMap<RestaurantId, (f64, i64)> = BTreeMap::new();
        for review in self.reviews.values().filter(|r| r.is_approved()) {
            let entry = totals.entry(review.restaurant_id).or_default();
            entry.0 += review.overall_rating();
            entry.1 += 1;
        }

        self.restaurants
            .values()
            .filter(|r| r.is_active)
            .map(|r| {
                let (sum, count) = totals.get(&r.id).copied().unwrap_or_default();
                let summary = RestaurantSummary {
                    id: r.id,
                    name: r.name.clone(),
                    cuisine: r.cuisine.clone(),
                    city: r.city.clone(),
                    featured: r.featured,
                    average_rating: if count > 0 { sum / count as f64 } else { 0.0 },
                    review_count: count,
                };
                (r, summary)
            })
            .collect()
    }
}

/// Process-local store with the same transactional semantics as PostgreSQL
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(a: &Review, b: &Review) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

fn compare(sort: ReviewSort, a: &Review, b: &Review) -> Ordering {
    match sort {
        ReviewSort::Newest => Ordering::Equal,
        ReviewSort::RatingDesc => b.overall_rating().total_cmp(&a.overall_rating()),
        ReviewSort::RatingAsc => a.overall_rating().total_cmp(&b.overall_rating()),
        ReviewSort::Helpful => b.helpful_count.cmp(&a.helpful_count),
    }
    .then_with(|| newest_first(a, b))
}

fn eq_ignore_case(value: &str, wanted: &str) -> bool {
    value.to_lowercase() == wanted.trim().to_lowercase()
}

fn matches_catalog(
    query: &RestaurantQuery,
    restaurant: &Restaurant,
    summary: &RestaurantSummary,
) -> bool {
    if let Some(cuisine) = &query.cuisine {
        if !eq_ignore_case(&restaurant.cuisine, cuisine) {
            return false;
        }
    }
    if let Some(city) = &query.city {
        if !restaurant.city.as_deref().is_some_and(|c| eq_ignore_case(c, city)) {
            return false;
        }
    }
    if query.price_range.is_some() && restaurant.price_range != query.price_range {
        return false;
    }
    if query.featured.is_some_and(|featured| restaurant.featured != featured) {
        return false;
    }
    if query.min_rating.is_some_and(|min| summary.average_rating < min) {
        return false;
    }
    if let Some(search) = &query.search {
        let needle = search.trim().to_lowercase();
        let fields = [
            Some(&restaurant.name),
            restaurant.description.as_ref(),
            Some(&restaurant.cuisine),
        ];
        let found = fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle));
        if !found {
            return false;
        }
    }
    true
}

fn compare_catalog(
    sort: RestaurantSort,
    (a, a_summary): &(&Restaurant, RestaurantSummary),
    (b, b_summary): &(&Restaurant, RestaurantSummary),
) -> Ordering {
    match sort {
        RestaurantSort::Newest => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
        RestaurantSort::Rating => b_summary
            .average_rating
            .total_cmp(&a_summary.average_rating)
            .then(b_summary.review_count.cmp(&a_summary.review_count))
            .then(a.id.cmp(&b.id)),
        RestaurantSort::Reviews => b_summary
            .review_count
            .cmp(&a_summary.review_count)
            .then(a.id.cmp(&b.id)),
        RestaurantSort::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
    }
}

fn paginate<T>(rows: Vec<T>, page: Page) -> Paginated<T> {
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Paginated::new(items, total, page)
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        Ok(self.state.lock().await.reviews.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_approved_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<Review>> {
        let state = self.state.lock().await;
        Ok(state
            .reviews
            .values()
            .filter(|r| r.restaurant_id == restaurant_id && r.is_approved())
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
        query: &ReviewQuery,
    ) -> RepoResult<Paginated<Review>> {
        let state = self.state.lock().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.restaurant_id == restaurant_id && r.is_approved())
            .filter(|r| query.min_rating.map_or(true, |min| r.overall_rating() >= min))
            .filter(|r| query.author_id.map_or(true, |author| r.author_id == author))
            .cloned()
            .collect();
        drop(state);

        reviews.sort_by(|a, b| compare(query.sort, a, b));
        Ok(paginate(reviews, query.page))
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: UserId,
        approved_only: bool,
        page: Page,
    ) -> RepoResult<Paginated<Review>> {
        let state = self.state.lock().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.author_id == author_id && (!approved_only || r.is_approved()))
            .cloned()
            .collect();
        drop(state);

        reviews.sort_by(newest_first);
        Ok(paginate(reviews, page))
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, page: Page) -> RepoResult<Paginated<Review>> {
        let state = self.state.lock().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.status.kind() == ReviewStatusKind::Pending)
            .cloned()
            .collect();
        drop(state);

        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(reviews, page))
    }

    #[instrument(skip(self, review), fields(restaurant_id = %restaurant_id, author_id = %author_id))]
    async fn create(
        &self,
        restaurant_id: RestaurantId,
        author_id: UserId,
        review: &NewReview,
    ) -> RepoResult<Review> {
        let mut state = self.state.lock().await;
        if !state.restaurants.contains_key(&restaurant_id) {
            return Err(DomainError::RestaurantNotFound(restaurant_id));
        }

        let id = state.next_review_id();
        let review = Review::from_new(id, restaurant_id, author_id, review.clone(), Utc::now());
        state.reviews.insert(id, review.clone());
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<StatusCounts> {
        let state = self.state.lock().await;
        let mut counts = StatusCounts::default();
        for review in state.reviews.values() {
            match review.status.kind() {
                ReviewStatusKind::Pending => counts.pending += 1,
                ReviewStatusKind::Approved => counts.approved += 1,
                ReviewStatusKind::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find(&self, review_id: ReviewId, user_id: UserId) -> RepoResult<Option<Reaction>> {
        let state = self.state.lock().await;
        Ok(state.reactions.get(&(review_id, user_id)).cloned())
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        Ok(self.state.lock().await.restaurants.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_cuisine(&self, cuisine: &str) -> RepoResult<Vec<Restaurant>> {
        let wanted = cuisine.trim().to_lowercase();
        let state = self.state.lock().await;
        let mut restaurants: Vec<Restaurant> = state
            .restaurants
            .values()
            .filter(|r| r.is_active && r.cuisine.to_lowercase() == wanted)
            .cloned()
            .collect();
        drop(state);

        restaurants.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(restaurants)
    }

    #[instrument(skip(self))]
    async fn find_filtered(
        &self,
        query: &RestaurantQuery,
    ) -> RepoResult<Paginated<RestaurantSummary>> {
        let state = self.state.lock().await;
        let mut rows: Vec<(&Restaurant, RestaurantSummary)> = state
            .catalog()
            .into_iter()
            .filter(|(restaurant, summary)| matches_catalog(query, restaurant, summary))
            .collect();

        rows.sort_by(|a, b| compare_catalog(query.sort, a, b));
        let summaries = rows.into_iter().map(|(_, summary)| summary).collect();
        Ok(paginate(summaries, query.page))
    }

    #[instrument(skip(self))]
    async fn summaries(&self) -> RepoResult<Vec<RestaurantSummary>> {
        let state = self.state.lock().await;
        Ok(state.catalog().into_iter().map(|(_, summary)| summary).collect())
    }

    #[instrument(skip(self))]
    async fn set_featured(&self, id: RestaurantId, featured: bool) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        match state.restaurants.get_mut(&id) {
            Some(restaurant) if restaurant.is_active => {
                restaurant.featured = featured;
                restaurant.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: RestaurantId) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        match state.restaurants.get_mut(&id) {
            Some(restaurant) if restaurant.is_active => {
                restaurant.is_active = false;
                restaurant.featured = false;
                restaurant.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ModeratorRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_role(&self, user_id: UserId) -> RepoResult<Option<ModeratorRole>> {
        Ok(self.state.lock().await.moderators.get(&user_id).copied())
    }

    #[instrument(skip(self))]
    async fn assign_role(&self, user_id: UserId, role: ModeratorRole) -> RepoResult<()> {
        self.state.lock().await.moderators.insert(user_id, role);
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn Transaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryTransaction::new(guard)))
    }
}
