use std::sync::Arc;

use sqlx::SqlitePool;

use super::{MovieSearchProvider, MovieSyncService};
use crate::models::{normalize_query, Movie};
use crate::repositories::MovieRepository;

/// Message returned when the provider reports zero matches.
pub const NO_RESULTS_MESSAGE: &str = "검색 결과가 없습니다.";

#[derive(Debug)]
pub enum SearchOutcome {
    /// Matching movies from the store
    Movies(Vec<Movie>),
    /// The provider answered with an empty result set
    NoResults,
}

/// Title search that lazily fills the movie table from the provider.
#[derive(Clone)]
pub struct SearchService {
    db: SqlitePool,
    provider: Arc<dyn MovieSearchProvider>,
    sync: MovieSyncService,
}

impl SearchService {
    pub fn new(db: SqlitePool, provider: Arc<dyn MovieSearchProvider>) -> Self {
        let sync = MovieSyncService::new(db.clone());
        Self { db, provider, sync }
    }

    /// Search by title.
    ///
    /// The provider is always asked first. A provider failure falls back to
    /// whatever is already stored; an empty provider answer short-circuits
    /// without touching the store.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, sqlx::Error> {
        let query = normalize_query(query);

        match self.provider.search_movies(&query).await {
            Ok(response) if response.is_empty() => {
                tracing::debug!("Provider returned no results for {:?}", query);
                return Ok(SearchOutcome::NoResults);
            }
            Ok(response) => {
                let synced = self.sync.sync(&response).await?;
                tracing::info!("Search {:?}: synced {} movies", query, synced);
            }
            Err(e) => {
                tracing::warn!(
                    "Movie provider search failed for {:?}, using stored movies: {}",
                    query,
                    e
                );
            }
        }

        let movies = MovieRepository::search_by_title(&self.db, &query).await?;
        Ok(SearchOutcome::Movies(movies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::CreateMovie;
    use async_trait::async_trait;
    use kmdb::{Collection, KmdbError, MovieRecord, SearchResponse};
    use std::sync::Mutex;

    /// Provider that replays a fixed answer and records the queries it saw.
    struct StubProvider {
        response: Option<SearchResponse>,
        queries: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn answering(records: Vec<MovieRecord>) -> Self {
            let count = records.len() as i64;
            Self {
                response: Some(SearchResponse {
                    total_count: count,
                    data: vec![Collection {
                        count,
                        total_count: count,
                        result: records,
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MovieSearchProvider for StubProvider {
        async fn search_movies(&self, title: &str) -> Result<SearchResponse, KmdbError> {
            self.queries.lock().unwrap().push(title.to_string());
            self.response.clone().ok_or(KmdbError::Api {
                status_code: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn record(docid: &str, title: &str) -> MovieRecord {
        MovieRecord {
            doc_id: docid.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_syncs_and_returns_matches() {
        let pool = test_pool().await;
        let provider = Arc::new(StubProvider::answering(vec![record("F24630", "인셉션")]));
        let service = SearchService::new(pool.clone(), provider.clone());

        let outcome = service.search("인 셉 션").await.unwrap();

        assert_eq!(provider.queries.lock().unwrap().as_slice(), ["인셉션"]);
        match outcome {
            SearchOutcome::Movies(movies) => {
                assert_eq!(movies.len(), 1);
                assert_eq!(movies[0].title, "인셉션");
            }
            SearchOutcome::NoResults => panic!("expected movies"),
        }
    }

    #[tokio::test]
    async fn test_empty_provider_answer_leaves_store_untouched() {
        let pool = test_pool().await;
        let service = SearchService::new(pool.clone(), Arc::new(StubProvider::answering(vec![])));

        let outcome = service.search("없는영화").await.unwrap();

        assert!(matches!(outcome, SearchOutcome::NoResults));
        assert_eq!(MovieRepository::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_stored_movies() {
        let pool = test_pool().await;
        MovieRepository::create(
            &pool,
            &CreateMovie {
                title: "인셉션".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let service = SearchService::new(pool.clone(), Arc::new(StubProvider::failing()));

        match service.search("인셉션").await.unwrap() {
            SearchOutcome::Movies(movies) => assert_eq!(movies.len(), 1),
            SearchOutcome::NoResults => panic!("expected stored movie"),
        }
    }
}
