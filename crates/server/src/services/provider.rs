//! Abstraction over the remote movie search API.
//!
//! Handlers only see [`MovieSearchProvider`], which lets tests swap in a
//! canned provider instead of calling KMDb.

use async_trait::async_trait;
use kmdb::{KmdbClient, KmdbError, SearchParams, SearchResponse};

#[async_trait]
pub trait MovieSearchProvider: Send + Sync {
    /// Search movies by (already normalized) title.
    async fn search_movies(&self, title: &str) -> Result<SearchResponse, KmdbError>;
}

#[async_trait]
impl MovieSearchProvider for KmdbClient {
    async fn search_movies(&self, title: &str) -> Result<SearchResponse, KmdbError> {
        KmdbClient::search_movies(self, SearchParams::title(title)).await
    }
}
