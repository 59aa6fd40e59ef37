//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use review_common::{AppConfig, AppError, AppResult, StorageBackend};
use review_core::value_objects::{ModeratorRole, UserId};
use review_db::{
    create_pool, run_migrations, DatabaseConfig, MemoryStore, PgModeratorRepository,
    PgReactionRepository, PgRestaurantRepository, PgReviewRepository, PgUnitOfWork,
};
use review_service::{ServiceContext, ServiceContextBuilder, ServiceSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{api_v1_routes, health_routes, API_PREFIX};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are exempt from rate limiting.
///
/// # Errors
/// Returns `AppError::Config` when the rate limit settings are unusable
pub fn create_app(state: AppState) -> AppResult<Router> {
    let config = state.config();

    let api = apply_rate_limit(api_v1_routes(), &config.rate_limit)?;
    let router = Router::new().nest(API_PREFIX, health_routes().merge(api));
    let router = apply_middleware(
        router,
        &config.cors,
        config.app.env.is_production(),
        Duration::from_secs(config.request_timeout_secs),
    );

    Ok(router.with_state(state))
}

/// Initialize storage and services, and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let settings = ServiceSettings::from(&config.reviews);

    let service_context = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            ServiceContextBuilder::new()
                .store(MemoryStore::new())
                .settings(settings)
                .build()
        }
        StorageBackend::Postgres => {
            let db = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&DatabaseConfig::from(db))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            run_migrations(&pool, &db.migrations_dir)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            ServiceContextBuilder::new()
                .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
                .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
                .restaurant_repo(Arc::new(PgRestaurantRepository::new(pool.clone())))
                .moderator_repo(Arc::new(PgModeratorRepository::new(pool.clone())))
                .uow(Arc::new(PgUnitOfWork::new(pool)))
                .settings(settings)
                .build()
        }
    }
    .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(user_id) = config.bootstrap_super_admin {
        bootstrap_super_admin(&service_context, UserId::new(user_id)).await?;
    }

    Ok(AppState::new(service_context, config))
}

// Roles are otherwise only granted by an existing super admin
async fn bootstrap_super_admin(ctx: &ServiceContext, user_id: UserId) -> AppResult<()> {
    ctx.moderator_repo()
        .assign_role(user_id, ModeratorRole::SuperAdmin)
        .await?;
    info!(user_id = %user_id, "Bootstrap super admin assigned");
    Ok(())
}

/// Run the HTTP server until it fails or receives Ctrl-C
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(AppError::internal)?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
