use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// KMDb open API service key
    pub kmdb_service_key: String,
    /// Overrides the KMDb host when set
    pub kmdb_base_url: Option<String>,
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn new(database_url: String, kmdb_service_key: String) -> Self {
        Self {
            database_url,
            max_connections: 5,
            kmdb_service_key,
            kmdb_base_url: None,
            provider_timeout_secs: 10,
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
