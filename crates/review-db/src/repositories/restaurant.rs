//! PostgreSQL implementation of RestaurantRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use review_core::entities::{Restaurant, RestaurantSummary};
use review_core::traits::{
    Paginated, RepoResult, RestaurantQuery, RestaurantRepository, RestaurantSort,
};
use review_core::value_objects::RestaurantId;

use crate::mappers::RestaurantDetails;
use crate::models::{AwardModel, HighlightModel, RestaurantModel, RestaurantSummaryModel};

use super::error::map_db_error;
use super::review::limit_offset;

pub(crate) const RESTAURANT_COLUMNS: &str = r"
    id, name, description, cuisine, address, city, price_range,
    website, phone, image_url, featured, is_active, created_at, updated_at
";

/// Active restaurants joined with their approved-review aggregate, with the
/// catalog filters applied ($1 to $5). $6 bounds the average rating.
const CATALOG: &str = r"
    WITH catalog AS (
        SELECT r.id, r.name, r.cuisine, r.city, r.featured, r.created_at,
               COALESCE(AVG(v.overall_rating), 0)::float8 AS average_rating,
               COUNT(v.id) AS review_count
        FROM restaurants r
        LEFT JOIN reviews v ON v.restaurant_id = r.id AND v.status = 'approved'
        WHERE r.is_active
          AND ($1::text IS NULL OR LOWER(r.cuisine) = LOWER($1))
          AND ($2::text IS NULL OR LOWER(r.city) = LOWER($2))
          AND ($3::int2 IS NULL OR r.price_range = $3)
          AND ($4::bool IS NULL OR r.featured = $4)
          AND ($5::text IS NULL
               OR r.name ILIKE $5 OR r.description ILIKE $5 OR r.cuisine ILIKE $5)
        GROUP BY r.id
    )
";

const CATALOG_FILTER: &str = "$6::float8 IS NULL OR average_rating >= $6";

/// ORDER BY clause for a catalog sort; `id` makes every order total
fn catalog_order(sort: RestaurantSort) -> &'static str {
    match sort {
        RestaurantSort::Newest => "created_at DESC, id DESC",
        RestaurantSort::Rating => "average_rating DESC, review_count DESC, id",
        RestaurantSort::Reviews => "review_count DESC, id",
        RestaurantSort::Name => "name, id",
    }
}

/// `%term%` for ILIKE, with the wildcard characters of `term` escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// PostgreSQL implementation of RestaurantRepository
#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    /// Create a new PgRestaurantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load awards and highlights for a batch of restaurants
    async fn load_details(&self, ids: &[i64]) -> RepoResult<RestaurantDetails> {
        if ids.is_empty() {
            return Ok(RestaurantDetails::default());
        }

        let awards = sqlx::query_as::<_, AwardModel>(
            r#"
            SELECT restaurant_id, position, name, year
            FROM restaurant_awards
            WHERE restaurant_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let highlights = sqlx::query_as::<_, HighlightModel>(
            r#"
            SELECT restaurant_id, position, highlight
            FROM restaurant_highlights
            WHERE restaurant_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(RestaurantDetails::new(awards, highlights))
    }

    async fn with_details(&self, models: Vec<RestaurantModel>) -> RepoResult<Vec<Restaurant>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut details = self.load_details(&ids).await?;
        Ok(models.into_iter().map(|m| details.attach(m)).collect())
    }
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        let sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1");
        let result = sqlx::query_as::<_, RestaurantModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(self.with_details(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_cuisine(&self, cuisine: &str) -> RepoResult<Vec<Restaurant>> {
        let sql = format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants
             WHERE is_active AND LOWER(cuisine) = LOWER($1)
             ORDER BY name, id"
        );
        let rows = sqlx::query_as::<_, RestaurantModel>(&sql)
            .bind(cuisine.trim())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.with_details(rows).await
    }

    #[instrument(skip(self))]
    async fn find_filtered(
        &self,
        query: &RestaurantQuery,
    ) -> RepoResult<Paginated<RestaurantSummary>> {
        let cuisine = query.cuisine.as_deref().map(str::trim);
        let city = query.city.as_deref().map(str::trim);
        let search = query.search.as_deref().map(like_pattern);

        let total: i64 = sqlx::query_scalar(&format!(
            "{CATALOG} SELECT COUNT(*) FROM catalog WHERE {CATALOG_FILTER}"
        ))
        .bind(cuisine)
        .bind(city)
        .bind(query.price_range)
        .bind(query.featured)
        .bind(&search)
        .bind(query.min_rating)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let (limit, offset) = limit_offset(query.page);
        let sql = format!(
            "{CATALOG}
             SELECT id, name, cuisine, city, featured, average_rating, review_count
             FROM catalog WHERE {CATALOG_FILTER}
             ORDER BY {} LIMIT $7 OFFSET $8",
            catalog_order(query.sort)
        );
        let rows = sqlx::query_as::<_, RestaurantSummaryModel>(&sql)
            .bind(cuisine)
            .bind(city)
            .bind(query.price_range)
            .bind(query.featured)
            .bind(&search)
            .bind(query.min_rating)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let items = rows.into_iter().map(RestaurantSummary::from).collect();
        Ok(Paginated::new(items, total, query.page))
    }

    #[instrument(skip(self))]
    async fn summaries(&self) -> RepoResult<Vec<RestaurantSummary>> {
        let rows = sqlx::query_as::<_, RestaurantSummaryModel>(
            r#"
            SELECT r.id, r.name, r.cuisine, r.city, r.featured,
                   COALESCE(AVG(v.overall_rating), 0)::float8 AS average_rating,
                   COUNT(v.id) AS review_count
            FROM restaurants r
            LEFT JOIN reviews v ON v.restaurant_id = r.id AND v.status = 'approved'
            WHERE r.is_active
            GROUP BY r.id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RestaurantSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn set_featured(&self, id: RestaurantId, featured: bool) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE restaurants
            SET featured = $2, updated_at = NOW()
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id.into_inner())
        .bind(featured)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: RestaurantId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE restaurants
            SET is_active = FALSE, featured = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRestaurantRepository>();
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" sushi "), "%sushi%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }

    #[test]
    fn test_catalog_orders_are_total() {
        for sort in [
            RestaurantSort::Newest,
            RestaurantSort::Rating,
            RestaurantSort::Reviews,
            RestaurantSort::Name,
        ] {
            assert!(catalog_order(sort).contains("id"));
        }
    }
}
