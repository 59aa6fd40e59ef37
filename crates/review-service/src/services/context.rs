//! Service context - dependency container for services
//!
//! Holds the repositories, the unit of work and the tunable settings needed
//! by services.

use std::sync::Arc;

use review_common::{AppError, ReviewSettings};
use review_core::traits::{
    ModeratorRepository, ReactionRepository, RestaurantRepository, ReviewRepository, UnitOfWork,
};

use super::error::{ServiceError, ServiceResult};

/// Tunable service behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Minimum approved reviews for the top-rated list when the caller gives none
    pub top_rated_min_reviews: i64,
    /// Number of restaurants shown on the moderation dashboard
    pub dashboard_top_restaurants: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            top_rated_min_reviews: 3,
            dashboard_top_restaurants: 5,
        }
    }
}

impl From<&ReviewSettings> for ServiceSettings {
    fn from(settings: &ReviewSettings) -> Self {
        Self {
            top_rated_min_reviews: settings.top_rated_min_reviews,
            ..Self::default()
        }
    }
}

/// Service context containing all dependencies
///
/// Reads go through the repositories; every multi-row or read-then-write
/// change goes through [`UnitOfWork`].
#[derive(Clone)]
pub struct ServiceContext {
    review_repo: Arc<dyn ReviewRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    restaurant_repo: Arc<dyn RestaurantRepository>,
    moderator_repo: Arc<dyn ModeratorRepository>,
    uow: Arc<dyn UnitOfWork>,
    settings: ServiceSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        restaurant_repo: Arc<dyn RestaurantRepository>,
        moderator_repo: Arc<dyn ModeratorRepository>,
        uow: Arc<dyn UnitOfWork>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            review_repo,
            reaction_repo,
            restaurant_repo,
            moderator_repo,
            uow,
            settings,
        }
    }

    // === Repositories ===

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the restaurant repository
    pub fn restaurant_repo(&self) -> &dyn RestaurantRepository {
        self.restaurant_repo.as_ref()
    }

    /// Get the moderator repository
    pub fn moderator_repo(&self) -> &dyn ModeratorRepository {
        self.moderator_repo.as_ref()
    }

    /// Get the unit of work used to open transactions
    pub fn uow(&self) -> &dyn UnitOfWork {
        self.uow.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    review_repo: Option<Arc<dyn ReviewRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    restaurant_repo: Option<Arc<dyn RestaurantRepository>>,
    moderator_repo: Option<Arc<dyn ModeratorRepository>>,
    uow: Option<Arc<dyn UnitOfWork>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one backend for every repository and the unit of work
    pub fn store<S>(self, store: S) -> Self
    where
        S: ReviewRepository
            + ReactionRepository
            + RestaurantRepository
            + ModeratorRepository
            + UnitOfWork
            + Clone
            + 'static,
    {
        self.review_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .restaurant_repo(Arc::new(store.clone()))
            .moderator_repo(Arc::new(store.clone()))
            .uow(Arc::new(store))
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn restaurant_repo(mut self, repo: Arc<dyn RestaurantRepository>) -> Self {
        self.restaurant_repo = Some(repo);
        self
    }

    pub fn moderator_repo(mut self, repo: Arc<dyn ModeratorRepository>) -> Self {
        self.moderator_repo = Some(repo);
        self
    }

    pub fn uow(mut self, uow: Arc<dyn UnitOfWork>) -> Self {
        self.uow = Some(uow);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns a configuration error if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.review_repo.ok_or_else(|| missing("review_repo"))?,
            self.reaction_repo.ok_or_else(|| missing("reaction_repo"))?,
            self.restaurant_repo.ok_or_else(|| missing("restaurant_repo"))?,
            self.moderator_repo.ok_or_else(|| missing("moderator_repo"))?,
            self.uow.ok_or_else(|| missing("uow"))?,
            self.settings,
        ))
    }
}

fn missing(dependency: &str) -> ServiceError {
    AppError::Config(format!("{dependency} is required")).into()
}
