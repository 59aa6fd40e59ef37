//! Moderator role <-> model mapper

use review_core::error::DomainError;
use review_core::value_objects::ModeratorRole;

use crate::models::ModeratorModel;

impl TryFrom<ModeratorModel> for ModeratorRole {
    type Error = DomainError;

    fn try_from(model: ModeratorModel) -> Result<Self, Self::Error> {
        model.role.parse().map_err(DomainError::DatabaseError)
    }
}
