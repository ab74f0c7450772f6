use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, AppResult, MessageResponse, ValidationErrors};
use crate::models::{CreateMovie, Movie, UpdateMovie};
use crate::repositories::MovieRepository;
use crate::state::AppState;

/// Unique docid collisions are a client error, not a server one.
fn docid_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::conflict("A movie with this docid already exists");
        }
    }
    e.into()
}

/// List all movies
#[utoipa::path(
    get,
    path = "/movieinfo/detail/",
    tag = "movies",
    responses(
        (status = 200, description = "List of all movies", body = Vec<Movie>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepository::get_all(&state.db).await?;
    Ok(Json(movies))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movieinfo/detail/",
    tag = "movies",
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie created successfully", body = Movie),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
        (status = 409, description = "Duplicate docid", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovie>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let Json(payload) = payload.map_err(ValidationErrors::from)?;
    let data = payload.validate()?;
    let movie = MovieRepository::create(&state.db, &data)
        .await
        .map_err(docid_conflict)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get a movie by ID
#[utoipa::path(
    get,
    path = "/movieinfo/detail/{movie_id}/",
    tag = "movies",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie", body = Movie),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;
    Ok(Json(movie))
}

/// Replace every field of a movie
#[utoipa::path(
    put,
    path = "/movieinfo/detail/{movie_id}/",
    tag = "movies",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    request_body = CreateMovie,
    responses(
        (status = 200, description = "Movie replaced", body = Movie),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 409, description = "Duplicate docid", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn replace_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CreateMovie>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Json(payload) = payload.map_err(ValidationErrors::from)?;
    let data = payload.validate()?;
    let movie = MovieRepository::update(&state.db, id, &data)
        .await
        .map_err(docid_conflict)?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;
    Ok(Json(movie))
}

/// Partially update a movie
#[utoipa::path(
    patch,
    path = "/movieinfo/detail/{movie_id}/",
    tag = "movies",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    request_body = UpdateMovie,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 409, description = "Duplicate docid", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateMovie>, JsonRejection>,
) -> AppResult<Json<Movie>> {
    let Json(payload) = payload.map_err(ValidationErrors::from)?;
    let existing = MovieRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    let data = payload.apply(existing)?;
    let movie = MovieRepository::update(&state.db, id, &data)
        .await
        .map_err(docid_conflict)?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;
    Ok(Json(movie))
}

/// Delete a movie and its reviews
#[utoipa::path(
    delete,
    path = "/movieinfo/detail/{movie_id}/",
    tag = "movies",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !MovieRepository::delete(&state.db, id).await? {
        return Err(AppError::not_found("Movie not found"));
    }
    tracing::info!("Deleted movie {}", id);
    Ok(StatusCode::NO_CONTENT)
}
