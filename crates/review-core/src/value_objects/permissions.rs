//! Moderator permission flags and roles
//!
//! Regular users hold no flags. Moderators receive a fixed set of flags from
//! their role; `super_admin` holds every flag.

use bitflags::bitflags;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Moderation permission flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModeratorPermissions: u32 {
        /// Approve or reject pending reviews
        const MODERATE_REVIEWS   = 1 << 0;
        /// Delete any review, regardless of author
        const DELETE_REVIEWS     = 1 << 1;
        /// Create restaurants, toggle featured, deactivate
        const MANAGE_RESTAURANTS = 1 << 2;

        /// Everything (super admins)
        const ALL = Self::MODERATE_REVIEWS.bits()
            | Self::DELETE_REVIEWS.bits()
            | Self::MANAGE_RESTAURANTS.bits();
    }
}

impl ModeratorPermissions {
    /// Check if the permission set contains a required permission
    #[inline]
    pub fn has(&self, permission: ModeratorPermissions) -> bool {
        self.contains(permission)
    }

    /// Names of the individual flags that are set
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).filter(|name| *name != "ALL").collect()
    }
}

impl Default for ModeratorPermissions {
    fn default() -> Self {
        ModeratorPermissions::empty()
    }
}

// Serialized as the list of flag names
impl Serialize for ModeratorPermissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.names())
    }
}

/// Moderator role stored per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeratorRole {
    Admin,
    SuperAdmin,
}

impl ModeratorRole {
    /// Storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Permissions granted by this role
    pub const fn permissions(self) -> ModeratorPermissions {
        match self {
            Self::Admin => ModeratorPermissions::MODERATE_REVIEWS
                .union(ModeratorPermissions::DELETE_REVIEWS),
            Self::SuperAdmin => ModeratorPermissions::ALL,
        }
    }
}

impl fmt::Display for ModeratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeratorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(format!("unknown moderator role: {other}")),
        }
    }
}
