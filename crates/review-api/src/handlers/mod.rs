//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod moderation;
pub mod reactions;
pub mod restaurants;
pub mod reviews;
