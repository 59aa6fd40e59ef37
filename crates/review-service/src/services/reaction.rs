//! Reaction service
//!
//! Helpful/unhelpful votes, one per (review, user). Every change runs in one
//! transaction that locks the review row, writes the reaction and refreshes
//! the review's counters from the stored rows, so concurrent votes on the
//! same review serialize and the counters never drift.

use tracing::{info, instrument};

use review_core::entities::{Reaction, ReactionKind, ReactionTally};
use review_core::value_objects::{Actor, ReviewId, UserId};
use review_core::DomainError;

use crate::dto::ReactionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::review::{lock_existing, refresh_reaction_counts};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the caller's reaction, replacing any previous one
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn set_reaction(
        &self,
        actor: &Actor,
        review_id: ReviewId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionResponse> {
        let mut tx = self.ctx.uow().begin().await?;
        lock_existing(tx.as_mut(), review_id).await?;

        tx.upsert_reaction(&Reaction::new(review_id, actor.user_id, kind))
            .await?;
        let tally = refresh_reaction_counts(tx.as_mut(), review_id).await?;
        tx.commit().await?;

        info!(
            review_id = %review_id,
            user_id = %actor.user_id,
            kind = %kind,
            helpful = tally.helpful,
            unhelpful = tally.unhelpful,
            "Reaction set"
        );

        Ok(response(review_id, actor.user_id, Some(kind), tally))
    }

    /// Remove the caller's reaction; removing a missing reaction succeeds
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn clear_reaction(
        &self,
        actor: &Actor,
        review_id: ReviewId,
    ) -> ServiceResult<ReactionResponse> {
        let mut tx = self.ctx.uow().begin().await?;
        lock_existing(tx.as_mut(), review_id).await?;

        let removed = tx.delete_reaction(review_id, actor.user_id).await?;
        let tally = refresh_reaction_counts(tx.as_mut(), review_id).await?;
        tx.commit().await?;

        info!(
            review_id = %review_id,
            user_id = %actor.user_id,
            removed,
            "Reaction cleared"
        );

        Ok(response(review_id, actor.user_id, None, tally))
    }

    /// Current reaction of `user_id` on a review
    #[instrument(skip(self))]
    pub async fn get_reaction(
        &self,
        review_id: ReviewId,
        user_id: UserId,
    ) -> ServiceResult<ReactionResponse> {
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        let reaction = self.ctx.reaction_repo().find(review_id, user_id).await?;

        Ok(response(
            review_id,
            user_id,
            reaction.map(|r| r.kind),
            review.tally(),
        ))
    }
}

fn response(
    review_id: ReviewId,
    user_id: UserId,
    kind: Option<ReactionKind>,
    tally: ReactionTally,
) -> ReactionResponse {
    ReactionResponse {
        review_id,
        user_id,
        kind,
        helpful_count: tally.helpful,
        unhelpful_count: tally.unhelpful,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{approved_review, restaurant, test_context};
    use crate::services::ReviewService;

    fn voter(id: i64) -> Actor {
        Actor::user(UserId::new(id))
    }

    #[tokio::test]
    async fn test_set_reaction_counts() {
        let (ctx, _store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;
        let service = ReactionService::new(&ctx);

        service
            .set_reaction(&voter(10), review_id, ReactionKind::Helpful)
            .await
            .unwrap();
        let tally = service
            .set_reaction(&voter(11), review_id, ReactionKind::Unhelpful)
            .await
            .unwrap();

        assert_eq!(tally.helpful_count, 1);
        assert_eq!(tally.unhelpful_count, 1);
    }

    #[tokio::test]
    async fn test_switching_reaction_moves_count() {
        let (ctx, _store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;
        let service = ReactionService::new(&ctx);

        service
            .set_reaction(&voter(10), review_id, ReactionKind::Helpful)
            .await
            .unwrap();
        let tally = service
            .set_reaction(&voter(10), review_id, ReactionKind::Unhelpful)
            .await
            .unwrap();

        assert_eq!(tally.helpful_count, 0);
        assert_eq!(tally.unhelpful_count, 1);
        assert_eq!(tally.kind, Some(ReactionKind::Unhelpful));

        let stored = ReviewService::new(&ctx).get_review(None, review_id).await.unwrap();
        assert_eq!(stored.helpful_count, 0);
        assert_eq!(stored.unhelpful_count, 1);
    }

    #[tokio::test]
    async fn test_set_is_idempotent() {
        let (ctx, _store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;
        let service = ReactionService::new(&ctx);

        for _ in 0..3 {
            service
                .set_reaction(&voter(10), review_id, ReactionKind::Helpful)
                .await
                .unwrap();
        }

        let state = service.get_reaction(review_id, UserId::new(10)).await.unwrap();
        assert_eq!(state.kind, Some(ReactionKind::Helpful));
        assert_eq!(state.helpful_count, 1);
    }

    #[tokio::test]
    async fn test_clear_reaction() {
        let (ctx, _store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;
        let service = ReactionService::new(&ctx);

        service
            .set_reaction(&voter(10), review_id, ReactionKind::Helpful)
            .await
            .unwrap();
        let cleared = service.clear_reaction(&voter(10), review_id).await.unwrap();
        assert_eq!(cleared.helpful_count, 0);
        assert!(cleared.kind.is_none());

        // Clearing again is a no-op success
        let cleared = service.clear_reaction(&voter(10), review_id).await.unwrap();
        assert_eq!(cleared.helpful_count, 0);
        assert!(service
            .get_reaction(review_id, UserId::new(10))
            .await
            .unwrap()
            .kind
            .is_none());
    }

    #[tokio::test]
    async fn test_reaction_on_missing_review() {
        let (ctx, _store) = test_context();
        let service = ReactionService::new(&ctx);
        let missing = ReviewId::new(77);

        let err = service
            .set_reaction(&voter(1), missing, ReactionKind::Helpful)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service.clear_reaction(&voter(1), missing).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_REVIEW");

        let err = service.get_reaction(missing, UserId::new(1)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_concurrent_reactions_keep_counts_exact() {
        let (ctx, _store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;

        let mut handles = Vec::new();
        for user in 0..20_i64 {
            let ctx = ctx.clone();
            handles.push(tokio::spawn(async move {
                let kind = if user % 2 == 0 {
                    ReactionKind::Helpful
                } else {
                    ReactionKind::Unhelpful
                };
                ReactionService::new(&ctx)
                    .set_reaction(&voter(100 + user), review_id, kind)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let review = ReviewService::new(&ctx).get_review(None, review_id).await.unwrap();
        assert_eq!(review.helpful_count, 10);
        assert_eq!(review.unhelpful_count, 10);
    }

    #[tokio::test]
    async fn test_deleting_review_removes_reactions() {
        let (ctx, store) = test_context();
        let restaurant_id = restaurant(&ctx, "Bistro", "French").await;
        let review_id = approved_review(&ctx, restaurant_id, 1, 4.0).await;

        ReactionService::new(&ctx)
            .set_reaction(&voter(10), review_id, ReactionKind::Helpful)
            .await
            .unwrap();
        ReviewService::new(&ctx)
            .delete_review(&voter(1), review_id)
            .await
            .unwrap();

        use review_core::traits::ReactionRepository;
        assert!(store
            .find(review_id, UserId::new(10))
            .await
            .unwrap()
            .is_none());
    }
}
