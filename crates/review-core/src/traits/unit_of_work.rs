//! Transactional write port
//!
//! Every write that touches more than one row, or that must read-then-write a
//! review row atomically, runs inside a [`Transaction`]. A transaction that is
//! dropped without [`Transaction::commit`] is rolled back, so an early `?`
//! return or a cancelled request leaves no partial state behind.

use async_trait::async_trait;

use crate::entities::{NewRestaurant, Reaction, ReactionTally, Restaurant, Review};
use crate::value_objects::{RestaurantId, ReviewId, UserId};

use super::repositories::RepoResult;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Start a new transaction
    async fn begin(&self) -> RepoResult<Box<dyn Transaction>>;
}

#[async_trait]
pub trait Transaction: Send {
    /// Load a review and hold its row lock until commit or rollback
    async fn lock_review(&mut self, id: ReviewId) -> RepoResult<Option<Review>>;

    /// Persist content, ratings and status of a review.
    /// Reaction counters are not written here.
    async fn save_review(&mut self, review: &Review) -> RepoResult<()>;

    /// Insert or replace the reaction of `(review, user)`
    async fn upsert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete the reaction of `(review, user)`; returns whether a row existed
    async fn delete_reaction(&mut self, review_id: ReviewId, user_id: UserId) -> RepoResult<bool>;

    /// Count the current reaction rows of a review by kind
    async fn count_reactions(&mut self, review_id: ReviewId) -> RepoResult<ReactionTally>;

    /// Overwrite the denormalized counters of a review
    async fn set_reaction_counts(&mut self, review_id: ReviewId, tally: ReactionTally) -> RepoResult<()>;

    /// Delete every reaction of a review; returns the number of rows removed
    async fn delete_reactions_for_review(&mut self, review_id: ReviewId) -> RepoResult<u64>;

    /// Delete a review row; returns whether it existed
    async fn delete_review(&mut self, review_id: ReviewId) -> RepoResult<bool>;

    /// Insert a restaurant together with its awards and highlights
    async fn insert_restaurant(&mut self, restaurant: &NewRestaurant) -> RepoResult<Restaurant>;

    /// Load a restaurant with its awards and highlights, holding its row lock
    async fn lock_restaurant(&mut self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;

    /// Overwrite a restaurant row and replace its awards and highlights
    async fn replace_restaurant(&mut self, restaurant: &Restaurant) -> RepoResult<()>;

    /// Make every write of this transaction durable
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}
