use utoipa::OpenApi;

use crate::api::handlers;
use crate::error::{MessageResponse, ValidationErrors};
use crate::models::{CreateMovie, Movie, Review, ReviewPayload, UpdateMovie};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movieinfo API",
        version = "1.0.0"
    ),
    paths(
        handlers::search_movies,
        handlers::list_movies,
        handlers::create_movie,
        handlers::get_movie,
        handlers::replace_movie,
        handlers::update_movie,
        handlers::delete_movie,
        handlers::list_reviews,
        handlers::create_review,
        handlers::get_review,
        handlers::update_review,
        handlers::replace_review,
        handlers::delete_review,
    ),
    tags(
        (name = "search", description = "Movie search endpoints"),
        (name = "movies", description = "Movie endpoints"),
        (name = "reviews", description = "One-line review endpoints")
    ),
    components(schemas(
        Movie,
        CreateMovie,
        UpdateMovie,
        Review,
        ReviewPayload,
        MessageResponse,
        ValidationErrors,
        handlers::SearchRequest,
        handlers::MovieSearchResponse
    ))
)]
pub struct ApiDoc;
