use sqlx::SqlitePool;

use crate::models::{NewReview, Review, ReviewChanges};

/// Common SELECT fields for review queries
const SELECT_REVIEW: &str = r#"
    SELECT
        id, movie_id, content, starpoint, created_at, updated_at
    FROM review
"#;

pub struct ReviewRepository;

impl ReviewRepository {
    /// Create a review owned by `movie_id`
    pub async fn create(
        pool: &SqlitePool,
        movie_id: i64,
        data: &NewReview,
    ) -> Result<Review, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO review (movie_id, content, starpoint)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(movie_id)
        .bind(&data.content)
        .bind(data.starpoint)
        .fetch_one(pool)
        .await?;

        let id: i64 = sqlx::Row::get(&result, "id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Get a review by ID regardless of its movie
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_REVIEW);
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a review only if it belongs to the given movie
    pub async fn get_for_movie(
        pool: &SqlitePool,
        id: i64,
        movie_id: i64,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("{} WHERE id = $1 AND movie_id = $2", SELECT_REVIEW);
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Get all reviews of a movie
    pub async fn get_by_movie_id(
        pool: &SqlitePool,
        movie_id: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("{} WHERE movie_id = $1 ORDER BY id ASC", SELECT_REVIEW);
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// Apply changes to a review of the given movie.
    ///
    /// Returns `None` when no review matches both IDs.
    pub async fn update_for_movie(
        pool: &SqlitePool,
        id: i64,
        movie_id: i64,
        changes: &ReviewChanges,
    ) -> Result<Option<Review>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE review SET
                content = COALESCE($1, content),
                starpoint = COALESCE($2, starpoint),
                movie_id = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $4 AND movie_id = $3
            "#,
        )
        .bind(&changes.content)
        .bind(changes.starpoint)
        .bind(movie_id)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::get_by_id(pool, id).await
    }

    /// Delete a review by ID
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
