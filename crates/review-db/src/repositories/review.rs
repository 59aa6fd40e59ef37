//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use review_core::entities::{NewReview, Review, StatusCounts};
use review_core::error::DomainError;
use review_core::traits::{Page, Paginated, RepoResult, ReviewQuery, ReviewRepository, ReviewSort};
use review_core::value_objects::{RestaurantId, ReviewId, UserId};

use crate::mappers::status_counts;
use crate::models::{ReviewModel, StatusCountModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// Columns selected for every review query
pub(crate) const REVIEW_COLUMNS: &str = r"
    id, restaurant_id, author_id, title, content,
    food_rating, taste_rating, ambiance_rating, creativity_rating, uniqueness_rating,
    status, moderated_by, moderated_at, helpful_count, unhelpful_count,
    images, visit_date, created_at, updated_at
";

/// ORDER BY clause for a listing sort; `id` makes every order total
pub(crate) fn order_clause(sort: ReviewSort) -> &'static str {
    match sort {
        ReviewSort::Newest => "created_at DESC, id DESC",
        ReviewSort::RatingDesc => "overall_rating DESC, created_at DESC, id DESC",
        ReviewSort::RatingAsc => "overall_rating ASC, created_at DESC, id DESC",
        ReviewSort::Helpful => "helpful_count DESC, created_at DESC, id DESC",
    }
}

pub(crate) fn into_reviews(rows: Vec<ReviewModel>) -> RepoResult<Vec<Review>> {
    rows.into_iter().map(Review::try_from).collect()
}

pub(crate) fn limit_offset(page: Page) -> (i64, i64) {
    (i64::from(page.limit), page.offset() as i64)
}

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        let result = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_approved_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<Review>> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews
             WHERE restaurant_id = $1 AND status = 'approved'
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(restaurant_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_reviews(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
        query: &ReviewQuery,
    ) -> RepoResult<Paginated<Review>> {
        const FILTER: &str = r"
            restaurant_id = $1
            AND status = 'approved'
            AND ($2::float8 IS NULL OR overall_rating >= $2)
            AND ($3::int8 IS NULL OR author_id = $3)
        ";

        let author = query.author_id.map(UserId::into_inner);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM reviews WHERE {FILTER}"))
            .bind(restaurant_id.into_inner())
            .bind(query.min_rating)
            .bind(author)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let (limit, offset) = limit_offset(query.page);
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE {FILTER}
             ORDER BY {} LIMIT $4 OFFSET $5",
            order_clause(query.sort)
        );
        let rows = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(restaurant_id.into_inner())
            .bind(query.min_rating)
            .bind(author)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Paginated::new(into_reviews(rows)?, total, query.page))
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: UserId,
        approved_only: bool,
        page: Page,
    ) -> RepoResult<Paginated<Review>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reviews
            WHERE author_id = $1 AND (NOT $2 OR status = 'approved')
            "#,
        )
        .bind(author_id.into_inner())
        .bind(approved_only)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let (limit, offset) = limit_offset(page);
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews
             WHERE author_id = $1 AND (NOT $2 OR status = 'approved')
             ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(author_id.into_inner())
            .bind(approved_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Paginated::new(into_reviews(rows)?, total, page))
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, page: Page) -> RepoResult<Paginated<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let (limit, offset) = limit_offset(page);
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE status = 'pending'
             ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Paginated::new(into_reviews(rows)?, total, page))
    }

    #[instrument(skip(self, review), fields(restaurant_id = %restaurant_id, author_id = %author_id))]
    async fn create(
        &self,
        restaurant_id: RestaurantId,
        author_id: UserId,
        review: &NewReview,
    ) -> RepoResult<Review> {
        let sql = format!(
            "INSERT INTO reviews (
                restaurant_id, author_id, title, content,
                food_rating, taste_rating, ambiance_rating, creativity_rating, uniqueness_rating,
                images, visit_date
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {REVIEW_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReviewModel>(&sql)
            .bind(restaurant_id.into_inner())
            .bind(author_id.into_inner())
            .bind(&review.title)
            .bind(&review.content)
            .bind(review.ratings.food)
            .bind(review.ratings.taste)
            .bind(review.ratings.ambiance)
            .bind(review.ratings.creativity)
            .bind(review.ratings.uniqueness)
            .bind(Json(&review.images))
            .bind(review.visit_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::RestaurantNotFound(restaurant_id))
            })?;

        Review::try_from(row)
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<StatusCounts> {
        let rows = sqlx::query_as::<_, StatusCountModel>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM reviews
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        status_counts(rows)
    }
}
