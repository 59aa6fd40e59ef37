//! Reaction entity - a user's helpful/unhelpful vote on a review

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{ReviewId, UserId};

/// Kind of reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Helpful,
    Unhelpful,
}

impl ReactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Helpful => "helpful",
            Self::Unhelpful => "unhelpful",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helpful" => Ok(Self::Helpful),
            "unhelpful" => Ok(Self::Unhelpful),
            other => Err(DomainError::ValidationError(format!(
                "unknown reaction type: {other}"
            ))),
        }
    }
}

/// Reaction entity, unique per (review, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(review_id: ReviewId, user_id: UserId, kind: ReactionKind) -> Self {
        Self {
            review_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Live reaction counts of one review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionTally {
    pub helpful: i64,
    pub unhelpful: i64,
}

impl ReactionTally {
    /// Count reactions by kind
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ReactionKind>,
    {
        kinds.into_iter().fold(Self::default(), |mut tally, kind| {
            match kind {
                ReactionKind::Helpful => tally.helpful += 1,
                ReactionKind::Unhelpful => tally.unhelpful += 1,
            }
            tally
        })
    }

    #[inline]
    pub fn total(&self) -> i64 {
        self.helpful + self.unhelpful
    }
}
