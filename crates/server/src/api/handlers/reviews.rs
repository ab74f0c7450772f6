use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult, MessageResponse, ValidationErrors};
use crate::models::{Review, ReviewChanges, ReviewPayload};
use crate::repositories::{MovieRepository, ReviewRepository};
use crate::state::AppState;

/// Path of a single review under its movie
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ReviewPath {
    /// Movie ID
    pub movie_id: i64,
    /// Review ID
    pub pk: i64,
}

/// Outcome of resolving a review under a movie.
///
/// Every failure variant is answered with the same fixed 400 for API
/// compatibility; they stay distinct here so the reason can be logged.
#[derive(Debug)]
enum ReviewLookup {
    Found(Review),
    NotFound,
    InvalidPath(String),
    Invalid(ValidationErrors),
}

impl ReviewLookup {
    fn into_result(self) -> AppResult<Review> {
        match self {
            ReviewLookup::Found(review) => Ok(review),
            ReviewLookup::NotFound => Err(AppError::invalid_response("review not found for movie")),
            ReviewLookup::InvalidPath(reason) => Err(AppError::invalid_response(reason)),
            ReviewLookup::Invalid(errors) => Err(AppError::invalid_response(errors.to_string())),
        }
    }
}

/// List the reviews of a movie
#[utoipa::path(
    get,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/",
    tag = "reviews",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Reviews of the movie", body = Vec<Review>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = ReviewRepository::get_by_movie_id(&state.db, movie_id).await?;
    Ok(Json(reviews))
}

/// Create a review for a movie
///
/// The owning movie is taken from the path; any `movie` in the body is ignored.
#[utoipa::path(
    post,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/",
    tag = "reviews",
    params(
        ("movie_id" = i64, Path, description = "Movie ID")
    ),
    request_body = ReviewPayload,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Invalid fields", body = ValidationErrors),
        (status = 404, description = "Movie not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let Json(payload) = payload.map_err(ValidationErrors::from)?;
    let review = payload.into_new_review()?;

    MovieRepository::get_by_id(&state.db, movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found"))?;

    let created = ReviewRepository::create(&state.db, movie_id, &review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a review of a movie
#[utoipa::path(
    get,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/{pk}/",
    tag = "reviews",
    params(ReviewPath),
    responses(
        (status = 200, description = "Review", body = Review),
        (status = 400, description = "No such review under this movie", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    path: Result<Path<ReviewPath>, PathRejection>,
) -> AppResult<Json<Review>> {
    let lookup = match path {
        Ok(Path(path)) => {
            match ReviewRepository::get_for_movie(&state.db, path.pk, path.movie_id).await? {
                Some(review) => ReviewLookup::Found(review),
                None => ReviewLookup::NotFound,
            }
        }
        Err(rejection) => ReviewLookup::InvalidPath(rejection.body_text()),
    };

    lookup.into_result().map(Json)
}

/// Partially update a review of a movie
#[utoipa::path(
    patch,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/{pk}/",
    tag = "reviews",
    params(ReviewPath),
    request_body = ReviewPayload,
    responses(
        (status = 202, description = "Review updated", body = Review),
        (status = 400, description = "No such review under this movie, or invalid fields", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    path: Result<Path<ReviewPath>, PathRejection>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = modify_review(&state.db, path, payload, false)
        .await?
        .into_result()?;
    Ok((StatusCode::ACCEPTED, Json(review)))
}

/// Replace the content and star point of a review
#[utoipa::path(
    put,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/{pk}/",
    tag = "reviews",
    params(ReviewPath),
    request_body = ReviewPayload,
    responses(
        (status = 202, description = "Review updated", body = Review),
        (status = 400, description = "No such review under this movie, or invalid fields", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn replace_review(
    State(state): State<AppState>,
    path: Result<Path<ReviewPath>, PathRejection>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = modify_review(&state.db, path, payload, true)
        .await?
        .into_result()?;
    Ok((StatusCode::ACCEPTED, Json(review)))
}

/// Delete a review by ID
#[utoipa::path(
    delete,
    path = "/movieinfo/detail/{movie_id}/onelinecritic/{pk}/",
    tag = "reviews",
    params(ReviewPath),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(path): Path<ReviewPath>,
) -> AppResult<StatusCode> {
    if !ReviewRepository::delete(&state.db, path.pk).await? {
        return Err(AppError::not_found("Review not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the review, validate the body and apply it.
///
/// `full` requires both fields. The owning movie is rewritten from the path.
async fn modify_review(
    db: &SqlitePool,
    path: Result<Path<ReviewPath>, PathRejection>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
    full: bool,
) -> AppResult<ReviewLookup> {
    let Path(path) = match path {
        Ok(path) => path,
        Err(rejection) => return Ok(ReviewLookup::InvalidPath(rejection.body_text())),
    };

    if ReviewRepository::get_for_movie(db, path.pk, path.movie_id)
        .await?
        .is_none()
    {
        return Ok(ReviewLookup::NotFound);
    }

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Ok(ReviewLookup::Invalid(rejection.into())),
    };

    let changes = if full {
        payload.into_new_review().map(|review| ReviewChanges {
            content: Some(review.content),
            starpoint: Some(review.starpoint),
        })
    } else {
        payload.into_changes()
    };
    let changes = match changes {
        Ok(changes) => changes,
        Err(errors) => return Ok(ReviewLookup::Invalid(errors)),
    };

    let lookup = match ReviewRepository::update_for_movie(db, path.pk, path.movie_id, &changes).await? {
        Some(review) => ReviewLookup::Found(review),
        None => ReviewLookup::NotFound,
    };
    Ok(lookup)
}
