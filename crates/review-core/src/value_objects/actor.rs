//! The authenticated caller of a core operation

use serde::Serialize;

use super::ids::UserId;
use super::permissions::{ModeratorPermissions, ModeratorRole};
use crate::error::DomainError;

/// Identity and permissions of whoever invokes an operation
///
/// Resolved by the HTTP layer and passed explicitly into every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub user_id: UserId,
    pub permissions: ModeratorPermissions,
}

impl Actor {
    /// A regular user without moderation rights
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            permissions: ModeratorPermissions::empty(),
        }
    }

    /// A user holding a moderator role
    pub fn with_role(user_id: UserId, role: Option<ModeratorRole>) -> Self {
        Self {
            user_id,
            permissions: role.map(ModeratorRole::permissions).unwrap_or_default(),
        }
    }

    #[inline]
    pub fn can(&self, permission: ModeratorPermissions) -> bool {
        self.permissions.has(permission)
    }

    /// Fail with `MissingPermission` unless the actor holds `permission`
    pub fn require(&self, permission: ModeratorPermissions) -> Result<(), DomainError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission(permission.names().join("|")))
        }
    }
}
