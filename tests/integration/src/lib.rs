//! Integration test utilities for the review server
//!
//! Spawns the full HTTP application over the in-memory store and provides
//! request helpers and fixtures for end-to-end tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
