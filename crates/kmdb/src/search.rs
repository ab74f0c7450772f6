use crate::{models::SearchResponse, KmdbClient};

const SEARCH_PATH: &str = "/openapi-data2/wisenut/search_api/search_json2.jsp";
const COLLECTION: &str = "kmdb_new2";

/// Parameters for a title search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub title: String,
    /// Maximum number of records returned (the API caps this at 500)
    pub list_count: u32,
}

impl SearchParams {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            list_count: 50,
        }
    }
}

impl KmdbClient {
    /// Search movies by title.
    ///
    /// GET /openapi-data2/wisenut/search_api/search_json2.jsp
    pub async fn search_movies(&self, params: SearchParams) -> crate::Result<SearchResponse> {
        let url = self.url(SEARCH_PATH);
        let list_count = params.list_count.to_string();

        let response = self
            .client()
            .get(&url)
            .query(&[
                ("collection", COLLECTION),
                ("detail", "Y"),
                ("ServiceKey", self.service_key()),
                ("title", params.title.as_str()),
                ("listCount", list_count.as_str()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
