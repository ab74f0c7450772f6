use axum::{routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::handlers;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        // Search endpoint
        .route("/movieinfo/search/", post(handlers::search_movies))
        // Movie endpoints
        .route(
            "/movieinfo/detail/",
            get(handlers::list_movies).post(handlers::create_movie),
        )
        .route(
            "/movieinfo/detail/{movie_id}/",
            get(handlers::get_movie)
                .put(handlers::replace_movie)
                .patch(handlers::update_movie)
                .delete(handlers::delete_movie),
        )
        // Review endpoints, scoped by movie
        .route(
            "/movieinfo/detail/{movie_id}/onelinecritic/",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route(
            "/movieinfo/detail/{movie_id}/onelinecritic/{pk}/",
            get(handlers::get_review)
                .put(handlers::replace_review)
                .patch(handlers::update_review)
                .delete(handlers::delete_review),
        )
        // API document
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
