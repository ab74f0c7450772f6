use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppResult, MessageResponse, ValidationErrors};
use crate::models::{normalize_query, Movie};
use crate::services::{SearchOutcome, NO_RESULTS_MESSAGE};
use crate::state::AppState;

/// Request body for movie search
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Title text; whitespace is ignored
    pub query: String,
}

/// Either the matching movies or a "no results" message
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum MovieSearchResponse {
    Movies(Vec<Movie>),
    Message(MessageResponse),
}

/// Search movies by title, filling the store from KMDb
#[utoipa::path(
    post,
    path = "/movieinfo/search/",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching movies, or a no-results message", body = MovieSearchResponse),
        (status = 400, description = "Missing or blank query", body = ValidationErrors),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_movies(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<MovieSearchResponse>> {
    let Json(request) = payload.map_err(|e| ValidationErrors::single("query", e.body_text()))?;

    if normalize_query(&request.query).is_empty() {
        return Err(ValidationErrors::single("query", "This field may not be blank.").into());
    }

    let response = match state.search.search(&request.query).await? {
        SearchOutcome::Movies(movies) => MovieSearchResponse::Movies(movies),
        SearchOutcome::NoResults => {
            MovieSearchResponse::Message(MessageResponse::new(NO_RESULTS_MESSAGE))
        }
    };

    Ok(Json(response))
}
