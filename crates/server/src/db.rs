use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS movie (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        docid TEXT UNIQUE,
        title TEXT NOT NULL,
        search_title TEXT NOT NULL,
        title_eng TEXT,
        prod_year INTEGER,
        nation TEXT,
        genre TEXT,
        directors TEXT,
        actors TEXT,
        runtime INTEGER,
        grade TEXT,
        plot TEXT,
        poster_url TEXT,
        release_date TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS review (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        movie_id INTEGER NOT NULL REFERENCES movie(id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        starpoint INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_review_movie_id ON review(movie_id)",
];

/// Open the pool and make sure the schema exists.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    create_pool("sqlite::memory:", 1).await.unwrap()
}
