//! Review entity and its moderation state machine
//!
//! ```text
//! pending ──approve──▶ approved
//!    └─────reject────▶ rejected
//! ```
//!
//! Approved and rejected are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{CategoryRatings, RatingsPatch, RestaurantId, ReviewId, UserId};

use super::reaction::ReactionTally;

/// Maximum number of image references per review
pub const MAX_IMAGES: usize = 10;

/// Status without moderation metadata, for storage and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatusKind {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatusKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatusKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::ValidationError(format!(
                "unknown review status: {other}"
            ))),
        }
    }
}

/// Review lifecycle status
///
/// Moderation metadata only exists on the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Pending,
    Approved {
        moderated_by: UserId,
        moderated_at: DateTime<Utc>,
    },
    Rejected {
        moderated_by: UserId,
        moderated_at: DateTime<Utc>,
    },
}

impl ReviewStatus {
    pub const fn kind(&self) -> ReviewStatusKind {
        match self {
            Self::Pending => ReviewStatusKind::Pending,
            Self::Approved { .. } => ReviewStatusKind::Approved,
            Self::Rejected { .. } => ReviewStatusKind::Rejected,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub const fn moderated_by(&self) -> Option<UserId> {
        match self {
            Self::Pending => None,
            Self::Approved { moderated_by, .. } | Self::Rejected { moderated_by, .. } => {
                Some(*moderated_by)
            }
        }
    }

    pub const fn moderated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::Approved { moderated_at, .. } | Self::Rejected { moderated_at, .. } => {
                Some(*moderated_at)
            }
        }
    }
}

/// Outcome chosen by a moderator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationDecision {
    #[serde(alias = "approve")]
    Approved,
    #[serde(alias = "reject")]
    Rejected,
}

impl ModerationDecision {
    pub const fn target(self) -> ReviewStatusKind {
        match self {
            Self::Approved => ReviewStatusKind::Approved,
            Self::Rejected => ReviewStatusKind::Rejected,
        }
    }
}

/// Validated input for a new review
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub title: String,
    pub content: String,
    pub ratings: CategoryRatings,
    pub visit_date: Option<NaiveDate>,
    pub images: Vec<String>,
}

impl NewReview {
    /// Validate content, ratings and visit date against `today`
    pub fn validate(&self, today: NaiveDate) -> Result<(), DomainError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        self.ratings.validate()?;
        check_visit_date(self.visit_date, today)?;
        check_images(&self.images)
    }
}

/// Author edit of an existing review; absent fields are left unchanged
///
/// `visit_date` is `Some(None)` to clear the date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub ratings: RatingsPatch,
    pub visit_date: Option<Option<NaiveDate>>,
    pub images: Option<Vec<String>>,
}

/// Review entity
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub restaurant_id: RestaurantId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub ratings: CategoryRatings,
    pub status: ReviewStatus,
    pub helpful_count: i64,
    pub unhelpful_count: i64,
    pub images: Vec<String>,
    pub visit_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Build a freshly stored review from validated input
    pub fn from_new(
        id: ReviewId,
        restaurant_id: RestaurantId,
        author_id: UserId,
        new: NewReview,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            restaurant_id,
            author_id,
            title: new.title,
            content: new.content,
            ratings: new.ratings,
            status: ReviewStatus::Pending,
            helpful_count: 0,
            unhelpful_count: 0,
            images: new.images,
            visit_date: new.visit_date,
            created_at,
            updated_at: created_at,
        }
    }

    /// Mean of the five category ratings
    #[inline]
    pub fn overall_rating(&self) -> f64 {
        self.ratings.mean()
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self.status, ReviewStatus::Approved { .. })
    }

    pub fn tally(&self) -> ReactionTally {
        ReactionTally {
            helpful: self.helpful_count,
            unhelpful: self.unhelpful_count,
        }
    }

    /// Move a pending review to its terminal state
    pub fn moderate(
        &mut self,
        decision: ModerationDecision,
        moderator: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self.status.kind(),
                to: decision.target(),
            });
        }

        self.status = match decision {
            ModerationDecision::Approved => ReviewStatus::Approved {
                moderated_by: moderator,
                moderated_at: at,
            },
            ModerationDecision::Rejected => ReviewStatus::Rejected {
                moderated_by: moderator,
                moderated_at: at,
            },
        };
        self.updated_at = at;
        Ok(())
    }

    /// Apply an author edit. Status is never touched.
    ///
    /// Rejected reviews are frozen. The patch is validated as a whole before
    /// any field changes, so a failed patch leaves the review untouched.
    pub fn apply_patch(&mut self, patch: ReviewPatch, at: DateTime<Utc>) -> Result<(), DomainError> {
        if matches!(self.status, ReviewStatus::Rejected { .. }) {
            return Err(DomainError::ReviewLocked(ReviewStatusKind::Rejected));
        }

        if let Some(title) = &patch.title {
            require_text("title", title)?;
        }
        if let Some(content) = &patch.content {
            require_text("content", content)?;
        }
        let ratings = patch.ratings.apply_to(&self.ratings)?;
        // Visit date is bounded by the review's creation, not by the edit time
        check_visit_date(patch.visit_date.flatten(), self.created_at.date_naive())?;
        if let Some(images) = &patch.images {
            check_images(images)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.ratings = ratings;
        if let Some(visit_date) = patch.visit_date {
            self.visit_date = visit_date;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        self.updated_at = at;
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

fn check_visit_date(visit_date: Option<NaiveDate>, limit: NaiveDate) -> Result<(), DomainError> {
    match visit_date {
        Some(date) if date > limit => Err(DomainError::FutureVisitDate),
        _ => Ok(()),
    }
}

fn check_images(images: &[String]) -> Result<(), DomainError> {
    if images.len() > MAX_IMAGES {
        return Err(DomainError::TooManyImages { max: MAX_IMAGES });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn new_review() -> NewReview {
        NewReview {
            title: "Great tasting menu".to_string(),
            content: "Inventive courses, slow service.".to_string(),
            ratings: CategoryRatings::new(5.0, 5.0, 4.0, 4.0, 3.0),
            visit_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            images: vec!["a.jpg".to_string()],
        }
    }

    fn review() -> Review {
        Review::from_new(
            ReviewId::new(1),
            RestaurantId::new(10),
            UserId::new(100),
            new_review(),
            created_at(),
        )
    }

    #[test]
    fn test_new_review_is_pending() {
        let review = review();
        assert_eq!(review.status, ReviewStatus::Pending);
        assert_eq!(review.tally(), ReactionTally::default());
        assert!((review.overall_rating() - 4.2).abs() < 1e-9);
        assert!(review.is_authored_by(UserId::new(100)));
    }

    #[test]
    fn test_validate_rejects_future_visit() {
        let mut input = new_review();
        let today = created_at().date_naive();
        input.visit_date = Some(today + Duration::days(1));
        assert!(matches!(
            input.validate(today),
            Err(DomainError::FutureVisitDate)
        ));

        input.visit_date = Some(today);
        assert!(input.validate(today).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title_and_many_images() {
        let today = created_at().date_naive();

        let mut input = new_review();
        input.title = "   ".to_string();
        assert!(input.validate(today).unwrap_err().is_validation());

        let mut input = new_review();
        input.images = (0..=MAX_IMAGES).map(|i| format!("{i}.jpg")).collect();
        assert!(matches!(
            input.validate(today),
            Err(DomainError::TooManyImages { .. })
        ));
    }

    #[test]
    fn test_moderate_once() {
        let mut review = review();
        let at = created_at() + Duration::hours(1);
        review
            .moderate(ModerationDecision::Approved, UserId::new(7), at)
            .unwrap();

        assert!(review.is_approved());
        assert_eq!(review.status.moderated_by(), Some(UserId::new(7)));
        assert_eq!(review.status.moderated_at(), Some(at));
    }

    #[test]
    fn test_moderate_terminal_fails_and_keeps_status() {
        let mut review = review();
        let at = created_at();
        review
            .moderate(ModerationDecision::Rejected, UserId::new(7), at)
            .unwrap();
        let before = review.status;

        let err = review
            .moderate(ModerationDecision::Approved, UserId::new(8), at)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: ReviewStatusKind::Rejected,
                to: ReviewStatusKind::Approved,
            }
        ));
        assert_eq!(review.status, before);
    }

    #[test]
    fn test_patch_recomputes_overall() {
        let mut review = review();
        let patch = ReviewPatch {
            ratings: RatingsPatch {
                uniqueness: Some(5.0),
                ..RatingsPatch::default()
            },
            ..ReviewPatch::default()
        };
        review.apply_patch(patch, created_at()).unwrap();
        assert!((review.overall_rating() - 4.6).abs() < 1e-9);
        assert_eq!(review.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_failed_patch_leaves_review_untouched() {
        let mut review = review();
        let original = review.clone();
        let patch = ReviewPatch {
            title: Some("New title".to_string()),
            ratings: RatingsPatch {
                food: Some(9.0),
                ..RatingsPatch::default()
            },
            ..ReviewPatch::default()
        };
        assert!(review.apply_patch(patch, created_at()).is_err());
        assert_eq!(review, original);
    }

    #[test]
    fn test_patch_visit_date_bounded_by_creation() {
        let mut review = review();
        let patch = ReviewPatch {
            visit_date: Some(Some(created_at().date_naive() + Duration::days(2))),
            ..ReviewPatch::default()
        };
        assert!(matches!(
            review.apply_patch(patch, created_at() + Duration::days(5)),
            Err(DomainError::FutureVisitDate)
        ));
    }

    #[test]
    fn test_patch_clears_visit_date() {
        let mut review = review();
        review.visit_date = NaiveDate::from_ymd_opt(2024, 5, 1);

        review
            .apply_patch(ReviewPatch::default(), created_at())
            .unwrap();
        assert!(review.visit_date.is_some());

        let patch = ReviewPatch {
            visit_date: Some(None),
            ..ReviewPatch::default()
        };
        review.apply_patch(patch, created_at()).unwrap();
        assert_eq!(review.visit_date, None);
    }

    #[test]
    fn test_rejected_review_is_locked() {
        let mut review = review();
        review
            .moderate(ModerationDecision::Rejected, UserId::new(7), created_at())
            .unwrap();
        let patch = ReviewPatch {
            title: Some("Edited".to_string()),
            ..ReviewPatch::default()
        };
        assert!(matches!(
            review.apply_patch(patch, created_at()),
            Err(DomainError::ReviewLocked(ReviewStatusKind::Rejected))
        ));
    }

    #[test]
    fn test_status_kind_parse() {
        assert_eq!(
            "approved".parse::<ReviewStatusKind>().unwrap(),
            ReviewStatusKind::Approved
        );
        assert!("archived".parse::<ReviewStatusKind>().is_err());
    }

    #[test]
    fn test_decision_aliases() {
        let d: ModerationDecision = serde_json::from_str(r#""approve""#).unwrap();
        assert_eq!(d, ModerationDecision::Approved);
        let d: ModerationDecision = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(d, ModerationDecision::Rejected);
    }
}
