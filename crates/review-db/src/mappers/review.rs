//! Review entity <-> model mapper

use chrono::{DateTime, Utc};
use review_core::entities::{Review, ReviewStatus, ReviewStatusKind, StatusCounts};
use review_core::error::DomainError;
use review_core::value_objects::{CategoryRatings, RestaurantId, ReviewId, UserId};

use crate::models::{ReviewModel, StatusCountModel};

/// Convert ReviewModel to Review entity
///
/// Fails when the row's status and moderation columns disagree.
impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let kind: ReviewStatusKind = model.status.parse()?;
        let status = match (kind, model.moderated_by, model.moderated_at) {
            (ReviewStatusKind::Pending, _, _) => ReviewStatus::Pending,
            (ReviewStatusKind::Approved, Some(by), Some(at)) => ReviewStatus::Approved {
                moderated_by: UserId::new(by),
                moderated_at: at,
            },
            (ReviewStatusKind::Rejected, Some(by), Some(at)) => ReviewStatus::Rejected {
                moderated_by: UserId::new(by),
                moderated_at: at,
            },
            (kind, _, _) => {
                return Err(DomainError::DatabaseError(format!(
                    "review {} is {kind} without moderation metadata",
                    model.id
                )))
            }
        };

        Ok(Review {
            id: ReviewId::new(model.id),
            restaurant_id: RestaurantId::new(model.restaurant_id),
            author_id: UserId::new(model.author_id),
            title: model.title,
            content: model.content,
            ratings: CategoryRatings::new(
                model.food_rating,
                model.taste_rating,
                model.ambiance_rating,
                model.creativity_rating,
                model.uniqueness_rating,
            ),
            status,
            helpful_count: model.helpful_count,
            unhelpful_count: model.unhelpful_count,
            images: model.images.0,
            visit_date: model.visit_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Review fields flattened for UPDATE statements
#[derive(Debug)]
pub struct ReviewColumns<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub ratings: CategoryRatings,
    pub status: &'static str,
    pub moderated_by: Option<i64>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub images: &'a [String],
    pub visit_date: Option<chrono::NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ReviewColumns<'a> {
    pub fn new(review: &'a Review) -> Self {
        Self {
            id: review.id.into_inner(),
            title: &review.title,
            content: &review.content,
            ratings: review.ratings,
            status: review.status.kind().as_str(),
            moderated_by: review.status.moderated_by().map(UserId::into_inner),
            moderated_at: review.status.moderated_at(),
            images: &review.images,
            visit_date: review.visit_date,
            updated_at: review.updated_at,
        }
    }
}

/// Fold per-status count rows into `StatusCounts`
pub fn status_counts(rows: Vec<StatusCountModel>) -> Result<StatusCounts, DomainError> {
    let mut counts = StatusCounts::default();
    for row in rows {
        match row.status.parse::<ReviewStatusKind>()? {
            ReviewStatusKind::Pending => counts.pending = row.count,
            ReviewStatusKind::Approved => counts.approved = row.count,
            ReviewStatusKind::Rejected => counts.rejected = row.count,
        }
    }
    Ok(counts)
}
