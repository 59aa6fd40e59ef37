//! Reaction entity <-> model mapper

use review_core::entities::{Reaction, ReactionTally};
use review_core::error::DomainError;
use review_core::value_objects::{ReviewId, UserId};

use crate::models::{ReactionModel, ReactionTallyModel};

/// Convert ReactionModel to Reaction entity
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            review_id: ReviewId::new(model.review_id),
            user_id: UserId::new(model.user_id),
            kind: model.kind.parse()?,
            created_at: model.created_at,
        })
    }
}

impl From<ReactionTallyModel> for ReactionTally {
    fn from(model: ReactionTallyModel) -> Self {
        ReactionTally {
            helpful: model.helpful,
            unhelpful: model.unhelpful,
        }
    }
}
