use std::sync::Arc;

use kmdb::KmdbClient;
use reqwest::Client;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::{MovieSearchProvider, SearchService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub search: Arc<SearchService>,
}

impl AppState {
    /// Build state backed by the real KMDb client.
    pub fn new(db: SqlitePool, config: Config) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(config.provider_timeout())
            .build()?;

        let mut kmdb = KmdbClient::new(http_client, &config.kmdb_service_key);
        if let Some(base_url) = &config.kmdb_base_url {
            kmdb = kmdb.with_base_url(base_url);
        }

        Ok(Self::with_provider(db, Arc::new(kmdb)))
    }

    /// Build state around any movie search provider.
    pub fn with_provider(db: SqlitePool, provider: Arc<dyn MovieSearchProvider>) -> Self {
        let search = Arc::new(SearchService::new(db.clone(), provider));
        Self { db, search }
    }
}
