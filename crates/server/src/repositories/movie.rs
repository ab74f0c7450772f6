use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{normalize_title, CreateMovie, Movie};

/// Common SELECT fields for movie queries
const SELECT_MOVIE: &str = r#"
    SELECT
        id, created_at, updated_at,
        docid, title, search_title, title_eng, prod_year,
        nation, genre, directors, actors, runtime, grade,
        plot, poster_url, release_date
    FROM movie
"#;

pub struct MovieRepository;

impl MovieRepository {
    /// Create a new movie
    pub async fn create(pool: &SqlitePool, data: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO movie (
                docid, title, search_title, title_eng, prod_year,
                nation, genre, directors, actors, runtime, grade,
                plot, poster_url, release_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&data.docid)
        .bind(&data.title)
        .bind(data.search_title())
        .bind(&data.title_eng)
        .bind(data.prod_year)
        .bind(&data.nation)
        .bind(&data.genre)
        .bind(&data.directors)
        .bind(&data.actors)
        .bind(data.runtime)
        .bind(&data.grade)
        .bind(&data.plot)
        .bind(&data.poster_url)
        .bind(&data.release_date)
        .fetch_one(pool)
        .await?;

        let id: i64 = sqlx::Row::get(&result, "id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Insert a movie or refresh the one with the same docid.
    /// Returns the movie ID.
    pub async fn upsert_by_docid_with_executor<'e, E>(
        executor: E,
        data: &CreateMovie,
    ) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO movie (
                docid, title, search_title, title_eng, prod_year,
                nation, genre, directors, actors, runtime, grade,
                plot, poster_url, release_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT(docid) DO UPDATE SET
                title = excluded.title,
                search_title = excluded.search_title,
                title_eng = excluded.title_eng,
                prod_year = excluded.prod_year,
                nation = excluded.nation,
                genre = excluded.genre,
                directors = excluded.directors,
                actors = excluded.actors,
                runtime = excluded.runtime,
                grade = excluded.grade,
                plot = excluded.plot,
                poster_url = excluded.poster_url,
                release_date = excluded.release_date,
                updated_at = CURRENT_TIMESTAMP
            RETURNING id
            "#,
        )
        .bind(&data.docid)
        .bind(&data.title)
        .bind(data.search_title())
        .bind(&data.title_eng)
        .bind(data.prod_year)
        .bind(&data.nation)
        .bind(&data.genre)
        .bind(&data.directors)
        .bind(&data.actors)
        .bind(data.runtime)
        .bind(&data.grade)
        .bind(&data.plot)
        .bind(&data.poster_url)
        .bind(&data.release_date)
        .fetch_one(executor)
        .await?;

        Ok(sqlx::Row::get(&result, "id"))
    }

    /// Get a movie by ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_MOVIE);
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a movie by provider docid
    pub async fn get_by_docid(pool: &SqlitePool, docid: &str) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{} WHERE docid = $1", SELECT_MOVIE);
        sqlx::query_as::<_, Movie>(&query)
            .bind(docid)
            .fetch_optional(pool)
            .await
    }

    /// Get all movies
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("{} ORDER BY id ASC", SELECT_MOVIE);
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// Movies whose search title contains the query.
    ///
    /// The query is normalized the same way titles are, so whitespace and
    /// case are ignored.
    pub async fn search_by_title(pool: &SqlitePool, query: &str) -> Result<Vec<Movie>, sqlx::Error> {
        let needle = normalize_title(query);
        let sql = format!(
            "{} WHERE instr(search_title, $1) > 0 ORDER BY id ASC",
            SELECT_MOVIE
        );
        sqlx::query_as::<_, Movie>(&sql)
            .bind(needle)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable field of a movie
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: &CreateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE movie SET
                docid = $1,
                title = $2,
                search_title = $3,
                title_eng = $4,
                prod_year = $5,
                nation = $6,
                genre = $7,
                directors = $8,
                actors = $9,
                runtime = $10,
                grade = $11,
                plot = $12,
                poster_url = $13,
                release_date = $14,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $15
            "#,
        )
        .bind(&data.docid)
        .bind(&data.title)
        .bind(data.search_title())
        .bind(&data.title_eng)
        .bind(data.prod_year)
        .bind(&data.nation)
        .bind(&data.genre)
        .bind(&data.directors)
        .bind(&data.actors)
        .bind(data.runtime)
        .bind(&data.grade)
        .bind(&data.plot)
        .bind(&data.poster_url)
        .bind(&data.release_date)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::get_by_id(pool, id).await
    }

    /// Delete a movie by ID (its reviews go with it)
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all movies
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movie")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn movie(title: &str, docid: Option<&str>) -> CreateMovie {
        CreateMovie {
            docid: docid.map(String::from),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;
        let created = MovieRepository::create(&pool, &movie("The Dark Knight", None))
            .await
            .unwrap();

        assert_eq!(created.search_title, "thedarkknight");
        let fetched = MovieRepository::get_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "The Dark Knight");
    }

    #[tokio::test]
    async fn test_search_is_case_and_space_insensitive() {
        let pool = test_pool().await;
        MovieRepository::create(&pool, &movie("The Dark Knight", None)).await.unwrap();
        MovieRepository::create(&pool, &movie("인셉션", None)).await.unwrap();

        let found = MovieRepository::search_by_title(&pool, "DARK kni").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "The Dark Knight");

        let found = MovieRepository::search_by_title(&pool, "셉 션").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "인셉션");
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let pool = test_pool().await;
        MovieRepository::create(&pool, &movie("Heat", None)).await.unwrap();

        let found = MovieRepository::search_by_title(&pool, "%").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_by_docid_updates_in_place() {
        let pool = test_pool().await;
        let first = MovieRepository::upsert_by_docid_with_executor(&pool, &movie("인셉션", Some("F24630")))
            .await
            .unwrap();
        let second = MovieRepository::upsert_by_docid_with_executor(
            &pool,
            &movie("인셉션 리마스터", Some("F24630")),
        )
        .await
        .unwrap();

        assert_eq!(first, second);
        assert_eq!(MovieRepository::count(&pool).await.unwrap(), 1);
        let stored = MovieRepository::get_by_docid(&pool, "F24630").await.unwrap().unwrap();
        assert_eq!(stored.title, "인셉션 리마스터");
        assert_eq!(stored.search_title, "인셉션리마스터");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let created = MovieRepository::create(&pool, &movie("Heat", None)).await.unwrap();

        let updated = MovieRepository::update(&pool, created.id, &movie("Heat (1995)", None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.search_title, "heat(1995)");

        assert!(MovieRepository::update(&pool, 999, &movie("x", None)).await.unwrap().is_none());
        assert!(MovieRepository::delete(&pool, created.id).await.unwrap());
        assert!(!MovieRepository::delete(&pool, created.id).await.unwrap());
    }
}
