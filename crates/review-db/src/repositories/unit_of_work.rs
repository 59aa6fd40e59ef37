//! PostgreSQL implementation of UnitOfWork
//!
//! A [`PgTransaction`] wraps a sqlx transaction. Dropping it without calling
//! `commit` lets sqlx roll the transaction back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use tracing::instrument;

use review_core::entities::{
    Award, NewRestaurant, Reaction, ReactionTally, Restaurant, Review,
};
use review_core::error::DomainError;
use review_core::traits::{RepoResult, Transaction, UnitOfWork};
use review_core::value_objects::{RestaurantId, ReviewId, UserId};

use crate::mappers::{restaurant_from_parts, ReviewColumns};
use crate::models::{
    AwardModel, HighlightModel, ReactionTallyModel, RestaurantModel, ReviewModel,
};

use super::error::map_db_error;
use super::restaurant::RESTAURANT_COLUMNS;
use super::review::REVIEW_COLUMNS;

/// PostgreSQL implementation of UnitOfWork
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create a new PgUnitOfWork
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn Transaction>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgTransaction { tx }))
    }
}

/// An open PostgreSQL transaction
pub struct PgTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

impl PgTransaction {
    /// Insert award and highlight rows, positioned by list order
    async fn insert_children(
        &mut self,
        restaurant_id: i64,
        awards: &[Award],
        highlights: &[String],
    ) -> RepoResult<()> {
        for (position, award) in awards.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO restaurant_awards (restaurant_id, position, name, year)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(restaurant_id)
            .bind(position as i32)
            .bind(&award.name)
            .bind(award.year)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;
        }

        for (position, highlight) in highlights.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO restaurant_highlights (restaurant_id, position, highlight)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(restaurant_id)
            .bind(position as i32)
            .bind(highlight)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    #[instrument(skip(self))]
    async fn lock_review(&mut self, id: ReviewId) -> RepoResult<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1 FOR UPDATE");
        let result = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn save_review(&mut self, review: &Review) -> RepoResult<()> {
        let columns = ReviewColumns::new(review);
        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET title = $2, content = $3,
                food_rating = $4, taste_rating = $5, ambiance_rating = $6,
                creativity_rating = $7, uniqueness_rating = $8,
                status = $9, moderated_by = $10, moderated_at = $11,
                images = $12, visit_date = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(columns.id)
        .bind(columns.title)
        .bind(columns.content)
        .bind(columns.ratings.food)
        .bind(columns.ratings.taste)
        .bind(columns.ratings.ambiance)
        .bind(columns.ratings.creativity)
        .bind(columns.ratings.uniqueness)
        .bind(columns.status)
        .bind(columns.moderated_by)
        .bind(columns.moderated_at)
        .bind(Json(columns.images))
        .bind(columns.visit_date)
        .bind(columns.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReviewNotFound(review.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert_reaction(&mut self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO review_reactions (review_id, user_id, kind, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (review_id, user_id)
            DO UPDATE SET kind = EXCLUDED.kind, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(reaction.review_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.kind.as_str())
        .bind(reaction.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_reaction(&mut self, review_id: ReviewId, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM review_reactions
            WHERE review_id = $1 AND user_id = $2
            "#,
        )
        .bind(review_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_reactions(&mut self, review_id: ReviewId) -> RepoResult<ReactionTally> {
        let tally = sqlx::query_as::<_, ReactionTallyModel>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE kind = 'helpful') AS helpful,
                COUNT(*) FILTER (WHERE kind = 'unhelpful') AS unhelpful
            FROM review_reactions
            WHERE review_id = $1
            "#,
        )
        .bind(review_id.into_inner())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(tally.into())
    }

    #[instrument(skip(self))]
    async fn set_reaction_counts(&mut self, review_id: ReviewId, tally: ReactionTally) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE reviews
            SET helpful_count = $2, unhelpful_count = $3
            WHERE id = $1
            "#,
        )
        .bind(review_id.into_inner())
        .bind(tally.helpful)
        .bind(tally.unhelpful)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_reactions_for_review(&mut self, review_id: ReviewId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM review_reactions WHERE review_id = $1")
            .bind(review_id.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_review(&mut self, review_id: ReviewId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id.into_inner())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, restaurant), fields(name = %restaurant.name))]
    async fn insert_restaurant(&mut self, restaurant: &NewRestaurant) -> RepoResult<Restaurant> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO restaurants (
                name, description, cuisine, address, city, price_range,
                website, phone, image_url, featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, created_at
            "#,
        )
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.address)
        .bind(&restaurant.city)
        .bind(restaurant.price_range)
        .bind(&restaurant.website)
        .bind(&restaurant.phone)
        .bind(&restaurant.image_url)
        .bind(restaurant.featured)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        self.insert_children(id, &restaurant.awards, &restaurant.highlights)
            .await?;

        Ok(Restaurant::from_new(
            RestaurantId::new(id),
            restaurant.clone(),
            created_at,
        ))
    }

    #[instrument(skip(self))]
    async fn lock_restaurant(&mut self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1 FOR UPDATE");
        let Some(model) = sqlx::query_as::<_, RestaurantModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?
        else {
            return Ok(None);
        };

        let awards = sqlx::query_as::<_, AwardModel>(
            r#"
            SELECT restaurant_id, position, name, year
            FROM restaurant_awards
            WHERE restaurant_id = $1
            "#,
        )
        .bind(model.id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        let highlights = sqlx::query_as::<_, HighlightModel>(
            r#"
            SELECT restaurant_id, position, highlight
            FROM restaurant_highlights
            WHERE restaurant_id = $1
            "#,
        )
        .bind(model.id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(Some(restaurant_from_parts(model, awards, highlights)))
    }

    #[instrument(skip(self, restaurant), fields(restaurant_id = %restaurant.id))]
    async fn replace_restaurant(&mut self, restaurant: &Restaurant) -> RepoResult<()> {
        let id = restaurant.id.into_inner();
        let result = sqlx::query(
            r#"
            UPDATE restaurants
            SET name = $2, description = $3, cuisine = $4, address = $5, city = $6,
                price_range = $7, website = $8, phone = $9, image_url = $10,
                featured = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.address)
        .bind(&restaurant.city)
        .bind(restaurant.price_range)
        .bind(&restaurant.website)
        .bind(&restaurant.phone)
        .bind(&restaurant.image_url)
        .bind(restaurant.featured)
        .bind(restaurant.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RestaurantNotFound(restaurant.id));
        }

        for table in ["restaurant_awards", "restaurant_highlights"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE restaurant_id = $1"))
                .bind(id)
                .execute(&mut *self.tx)
                .await
                .map_err(map_db_error)?;
        }

        self.insert_children(id, &restaurant.awards, &restaurant.highlights)
            .await
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let PgTransaction { tx } = *self;
        tx.commit().await.map_err(map_db_error)
    }
}
