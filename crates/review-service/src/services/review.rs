//! Review service
//!
//! Owns the review lifecycle: creation, author edits, moderation and
//! deletion. It is also the only writer of the helpful/unhelpful counters,
//! which it refreshes from the stored reactions inside the caller's
//! transaction.

use chrono::Utc;
use tracing::{info, instrument};

use review_core::entities::{ReactionTally, Review, ReviewStatus, ReviewStatusKind};
use review_core::traits::{Page, ReviewQuery, Transaction};
use review_core::value_objects::{Actor, ModeratorPermissions, RestaurantId, ReviewId, UserId};
use review_core::DomainError;

use crate::dto::{
    CreateReviewRequest, ModerateReviewRequest, PaginatedResponse, ReviewResponse,
    UpdateReviewRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a review for an active restaurant; it starts out pending
    #[instrument(skip(self, request), fields(user_id = %actor.user_id))]
    pub async fn create_review(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        self.require_active_restaurant(restaurant_id).await?;

        let new_review = request.into_new_review(Utc::now().date_naive())?;
        let review = self
            .ctx
            .review_repo()
            .create(restaurant_id, actor.user_id, &new_review)
            .await?;

        info!(
            review_id = %review.id,
            restaurant_id = %restaurant_id,
            author_id = %actor.user_id,
            "Review created"
        );

        Ok(ReviewResponse::from(review))
    }

    /// Get a review by ID
    ///
    /// Pending and rejected reviews are visible only to their author and to
    /// holders of `MODERATE_REVIEWS`; anyone else gets `UNKNOWN_REVIEW`.
    #[instrument(skip(self, viewer))]
    pub async fn get_review(
        &self,
        viewer: Option<&Actor>,
        review_id: ReviewId,
    ) -> ServiceResult<ReviewResponse> {
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .filter(|review| review.is_approved() || sees_unpublished(viewer, review.author_id))
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        Ok(ReviewResponse::from(review))
    }

    /// Edit a review; only its author may, and never once it is rejected
    #[instrument(skip(self, request), fields(user_id = %actor.user_id))]
    pub async fn update_review(
        &self,
        actor: &Actor,
        review_id: ReviewId,
        request: UpdateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let mut tx = self.ctx.uow().begin().await?;
        let mut review = lock_existing(tx.as_mut(), review_id).await?;

        if !review.is_authored_by(actor.user_id) {
            return Err(DomainError::NotReviewAuthor.into());
        }

        review.apply_patch(request.into(), Utc::now())?;
        tx.save_review(&review).await?;
        tx.commit().await?;

        info!(review_id = %review_id, "Review updated");

        Ok(ReviewResponse::from(review))
    }

    /// Approve or reject a pending review
    #[instrument(skip(self), fields(moderator_id = %actor.user_id))]
    pub async fn moderate_review(
        &self,
        actor: &Actor,
        review_id: ReviewId,
        request: ModerateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        actor.require(ModeratorPermissions::MODERATE_REVIEWS)?;

        let mut tx = self.ctx.uow().begin().await?;
        let mut review = lock_existing(tx.as_mut(), review_id).await?;

        review.moderate(request.decision, actor.user_id, Utc::now())?;
        tx.save_review(&review).await?;
        tx.commit().await?;

        info!(
            review_id = %review_id,
            status = %review.status.kind(),
            moderator_id = %actor.user_id,
            "Review moderated"
        );

        Ok(ReviewResponse::from(review))
    }

    /// Delete a review together with its reactions
    ///
    /// Authors may delete their own pending or approved reviews; holders of
    /// `DELETE_REVIEWS` may delete any review.
    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn delete_review(&self, actor: &Actor, review_id: ReviewId) -> ServiceResult<()> {
        let mut tx = self.ctx.uow().begin().await?;
        let review = lock_existing(tx.as_mut(), review_id).await?;

        if !actor.can(ModeratorPermissions::DELETE_REVIEWS) {
            if !review.is_authored_by(actor.user_id) {
                return Err(DomainError::NotReviewAuthor.into());
            }
            if let ReviewStatus::Rejected { .. } = review.status {
                return Err(DomainError::ReviewLocked(ReviewStatusKind::Rejected).into());
            }
        }

        let reactions_removed = tx.delete_reactions_for_review(review_id).await?;
        if !tx.delete_review(review_id).await? {
            return Err(DomainError::ReviewNotFound(review_id).into());
        }
        tx.commit().await?;

        info!(
            review_id = %review_id,
            reactions_removed,
            deleted_by = %actor.user_id,
            "Review deleted"
        );

        Ok(())
    }

    /// Approved reviews of a restaurant, filtered, sorted and paginated
    #[instrument(skip(self))]
    pub async fn list_restaurant_reviews(
        &self,
        restaurant_id: RestaurantId,
        query: ReviewQuery,
    ) -> ServiceResult<PaginatedResponse<ReviewResponse>> {
        self.require_active_restaurant(restaurant_id).await?;

        let page = self
            .ctx
            .review_repo()
            .find_by_restaurant(restaurant_id, &query)
            .await?;

        Ok(page.into())
    }

    /// Reviews written by a user, newest first
    ///
    /// The author and moderators see every status; other callers only see
    /// approved reviews.
    #[instrument(skip(self, viewer))]
    pub async fn list_author_reviews(
        &self,
        viewer: Option<&Actor>,
        author_id: UserId,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<ReviewResponse>> {
        let approved_only = !sees_unpublished(viewer, author_id);
        let page = self
            .ctx
            .review_repo()
            .find_by_author(author_id, approved_only, page)
            .await?;
        Ok(page.into())
    }

    async fn require_active_restaurant(&self, restaurant_id: RestaurantId) -> ServiceResult<()> {
        match self.ctx.restaurant_repo().find_by_id(restaurant_id).await? {
            Some(restaurant) if restaurant.is_active => Ok(()),
            _ => Err(DomainError::RestaurantNotFound(restaurant_id).into()),
        }
    }
}

/// Whether `viewer` may see the pending and rejected reviews of `author_id`
fn sees_unpublished(viewer: Option<&Actor>, author_id: UserId) -> bool {
    viewer.is_some_and(|actor| {
        actor.user_id == author_id || actor.can(ModeratorPermissions::MODERATE_REVIEWS)
    })
}

/// Lock a review row inside `tx`, failing when it does not exist
pub(crate) async fn lock_existing(
    tx: &mut dyn Transaction,
    review_id: ReviewId,
) -> ServiceResult<Review> {
    Ok(tx
        .lock_review(review_id)
        .await?
        .ok_or(DomainError::ReviewNotFound(review_id))?)
}

/// Recount the reactions of a review and store both counters
///
/// Must run inside the transaction that changed the reactions, after the
/// review row has been locked.
pub(crate) async fn refresh_reaction_counts(
    tx: &mut dyn Transaction,
    review_id: ReviewId,
) -> ServiceResult<ReactionTally> {
    let tally = tx.count_reactions(review_id).await?;
    tx.set_reaction_counts(review_id, tally).await?;
    Ok(tally)
}
