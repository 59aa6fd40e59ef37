//! Typed identifiers
//!
//! Reviews, restaurants and users are keyed by positive 64-bit integers
//! assigned by the store. Each key gets its own newtype so a `ReviewId`
//! can never be passed where a `RestaurantId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error when parsing an identifier from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create from a raw i64 value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse from string representation; only positive values are valid
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                s.trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|value| *value > 0)
                    .map(Self)
                    .ok_or(IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a review
    ReviewId
);

define_id!(
    /// Identifier of a restaurant
    RestaurantId
);

define_id!(
    /// Identifier of a user (authors, reactors, moderators)
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(ReviewId::parse("42"), Ok(ReviewId::new(42)));
        assert_eq!(" 7 ".parse::<UserId>(), Ok(UserId::new(7)));
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!(RestaurantId::parse("0"), Err(IdParseError::InvalidFormat));
        assert_eq!(RestaurantId::parse("-3"), Err(IdParseError::InvalidFormat));
        assert_eq!(RestaurantId::parse("abc"), Err(IdParseError::InvalidFormat));
    }

    #[test]
    fn test_display_and_conversion() {
        let id = ReviewId::from(99);
        assert_eq!(id.to_string(), "99");
        assert_eq!(i64::from(id), 99);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
        let id: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(id, UserId::new(12));
    }
}
