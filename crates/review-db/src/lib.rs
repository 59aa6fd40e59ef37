//! # review-db
//!
//! Database layer implementing the repository and transaction traits.
//!
//! ## Overview
//!
//! Two interchangeable backends implement every port defined in `review-core`:
//!
//! - PostgreSQL via SQLx: connection pool, migrations, `FromRow` models,
//!   model ↔ entity mappers, and `Pg*` repositories
//! - [`MemoryStore`]: a process-local store with the same transactional
//!   semantics, used by tests and `STORAGE_BACKEND=memory`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use review_db::{create_pool, run_migrations, DatabaseConfig, PgUnitOfWork};
//! use review_core::traits::UnitOfWork;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let uow = PgUnitOfWork::new(pool);
//!     let tx = uow.begin().await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgModeratorRepository, PgReactionRepository, PgRestaurantRepository, PgReviewRepository,
    PgUnitOfWork,
};
