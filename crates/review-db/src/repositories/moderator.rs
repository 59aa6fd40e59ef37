//! PostgreSQL implementation of ModeratorRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use review_core::traits::{ModeratorRepository, RepoResult};
use review_core::value_objects::{ModeratorRole, UserId};

use crate::models::ModeratorModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ModeratorRepository
#[derive(Clone)]
pub struct PgModeratorRepository {
    pool: PgPool,
}

impl PgModeratorRepository {
    /// Create a new PgModeratorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModeratorRepository for PgModeratorRepository {
    #[instrument(skip(self))]
    async fn find_role(&self, user_id: UserId) -> RepoResult<Option<ModeratorRole>> {
        let result = sqlx::query_as::<_, ModeratorModel>(
            r#"
            SELECT user_id, role, created_at
            FROM moderators
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ModeratorRole::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn assign_role(&self, user_id: UserId, role: ModeratorRole) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO moderators (user_id, role)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
