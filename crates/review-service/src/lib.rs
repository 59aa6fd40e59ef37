//! # review-service
//!
//! Application layer: review lifecycle, reaction tally, restaurant statistics,
//! catalog and moderation use cases, plus the request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ModerationService, ReactionService, RestaurantService, ReviewService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, StatsService,
};
