//! Transaction over the in-memory store

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, instrument};

use review_core::entities::{NewRestaurant, Reaction, ReactionTally, Restaurant, Review};
use review_core::error::DomainError;
use review_core::traits::{RepoResult, Transaction};
use review_core::value_objects::{RestaurantId, ReviewId, UserId};

use super::State;

/// Prior value of one entry touched by a transaction
enum Undo {
    Review(ReviewId, Option<Review>),
    Reaction((ReviewId, UserId), Option<Reaction>),
    Restaurant(RestaurantId, Option<Restaurant>),
}

/// Holds the store lock for its whole lifetime and writes in place
///
/// Every write first records the prior value of the entry it touches. Commit
/// forgets the log; dropping an uncommitted transaction replays it in
/// reverse. Ids handed out by the store are not reclaimed on rollback, as
/// with PostgreSQL sequences.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<State>,
    undo: Vec<Undo>,
}

impl MemoryTransaction {
    pub(crate) fn new(guard: OwnedMutexGuard<State>) -> Self {
        Self {
            guard,
            undo: Vec::new(),
        }
    }

    fn touch_review(&mut self, id: ReviewId) {
        let prior = self.guard.reviews.get(&id).cloned();
        self.undo.push(Undo::Review(id, prior));
    }

    fn touch_reaction(&mut self, key: (ReviewId, UserId)) {
        let prior = self.guard.reactions.get(&key).cloned();
        self.undo.push(Undo::Reaction(key, prior));
    }

    fn touch_restaurant(&mut self, id: RestaurantId) {
        let prior = self.guard.restaurants.get(&id).cloned();
        self.undo.push(Undo::Restaurant(id, prior));
    }

    /// Remove every reaction of a review, logging each one
    fn remove_reactions(&mut self, review_id: ReviewId) -> u64 {
        let keys: Vec<(ReviewId, UserId)> = self
            .guard
            .reactions_of(review_id)
            .map(|r| (r.review_id, r.user_id))
            .collect();
        for key in &keys {
            self.touch_reaction(*key);
            self.guard.reactions.remove(key);
        }
        keys.len() as u64
    }
}

fn restore<K: Ord, V>(map: &mut BTreeMap<K, V>, key: K, prior: Option<V>) {
    match prior {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if self.undo.is_empty() {
            return;
        }
        debug!(entries = self.undo.len(), "Rolling back memory transaction");

        let state = &mut *self.guard;
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Review(id, prior) => restore(&mut state.reviews, id, prior),
                Undo::Reaction(key, prior) => restore(&mut state.reactions, key, prior),
                Undo::Restaurant(id, prior) => restore(&mut state.restaurants, id, prior),
            }
        }
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn lock_review(&mut self, id: ReviewId) -> RepoResult<Option<Review>> {
        Ok(self.guard.reviews.get(&id).cloned())
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn save_review(&mut self, review: &Review) -> RepoResult<()> {
        if !self.guard.reviews.contains_key(&review.id) {
            return Err(DomainError::ReviewNotFound(review.id));
        }
        self.touch_review(review.id);

        let stored = self
            .guard
            .reviews
            .get_mut(&review.id)
            .ok_or(DomainError::ReviewNotFound(review.id))?;
        let tally = stored.tally();
        *stored = review.clone();
        stored.helpful_count = tally.helpful;
        stored.unhelpful_count = tally.unhelpful;
        Ok(())
    }

    async fn upsert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()> {
        let key = (reaction.review_id, reaction.user_id);
        self.touch_reaction(key);
        self.guard.reactions.insert(key, reaction.clone());
        Ok(())
    }

    async fn delete_reaction(&mut self, review_id: ReviewId, user_id: UserId) -> RepoResult<bool> {
        let key = (review_id, user_id);
        if !self.guard.reactions.contains_key(&key) {
            return Ok(false);
        }
        self.touch_reaction(key);
        Ok(self.guard.reactions.remove(&key).is_some())
    }

    async fn count_reactions(&mut self, review_id: ReviewId) -> RepoResult<ReactionTally> {
        Ok(ReactionTally::from_kinds(
            self.guard.reactions_of(review_id).map(|r| r.kind),
        ))
    }

    async fn set_reaction_counts(&mut self, review_id: ReviewId, tally: ReactionTally) -> RepoResult<()> {
        if !self.guard.reviews.contains_key(&review_id) {
            return Ok(());
        }
        self.touch_review(review_id);
        if let Some(review) = self.guard.reviews.get_mut(&review_id) {
            review.helpful_count = tally.helpful;
            review.unhelpful_count = tally.unhelpful;
        }
        Ok(())
    }

    async fn delete_reactions_for_review(&mut self, review_id: ReviewId) -> RepoResult<u64> {
        Ok(self.remove_reactions(review_id))
    }

    async fn delete_review(&mut self, review_id: ReviewId) -> RepoResult<bool> {
        // Reactions follow their review, as with ON DELETE CASCADE
        self.remove_reactions(review_id);
        if !self.guard.reviews.contains_key(&review_id) {
            return Ok(false);
        }
        self.touch_review(review_id);
        Ok(self.guard.reviews.remove(&review_id).is_some())
    }

    #[instrument(skip(self, restaurant), fields(name = %restaurant.name))]
    async fn insert_restaurant(&mut self, restaurant: &NewRestaurant) -> RepoResult<Restaurant> {
        let id = self.guard.next_restaurant_id();
        let restaurant = Restaurant::from_new(id, restaurant.clone(), Utc::now());
        self.touch_restaurant(id);
        self.guard.restaurants.insert(id, restaurant.clone());
        Ok(restaurant)
    }

    async fn lock_restaurant(&mut self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        Ok(self.guard.restaurants.get(&id).cloned())
    }

    #[instrument(skip(self, restaurant), fields(restaurant_id = %restaurant.id))]
    async fn replace_restaurant(&mut self, restaurant: &Restaurant) -> RepoResult<()> {
        if !self.guard.restaurants.contains_key(&restaurant.id) {
            return Err(DomainError::RestaurantNotFound(restaurant.id));
        }
        self.touch_restaurant(restaurant.id);
        self.guard.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> RepoResult<()> {
        self.undo.clear();
        Ok(())
    }
}
