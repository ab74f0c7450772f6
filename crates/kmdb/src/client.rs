use reqwest::Client;

use crate::error::KmdbError;

const BASE_URL: &str = "https://api.koreafilm.or.kr";

pub struct KmdbClient {
    client: Client,
    service_key: String,
    base_url: String,
}

impl KmdbClient {
    /// Create a KmdbClient with a reqwest Client.
    pub fn new(client: Client, service_key: impl Into<String>) -> Self {
        Self {
            client,
            service_key: service_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (mirrors, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn service_key(&self) -> &str {
        &self.service_key
    }

    /// Get the HTTP client for making requests.
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(KmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        decode(&body)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> crate::Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| KmdbError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}
