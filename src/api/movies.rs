use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::extract::JsonBody;
use super::validation::{validate_movie_search, validate_order};
use super::{
    ApiError, ApiResponse, AppState, CreateMovieRequest, CreatedMovie, DeleteMovieRequest,
    MovieDto, MovieListQuery, MovieQuery, UpdateMovieRequest,
};
use crate::models::{Identity, Movie, NewMovie};

/// POST /movie
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<CreateMovieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedMovie>>), ApiError> {
    let movie = NewMovie::from(payload);
    let movie_id = state.movie_service().create(&movie).await?;

    info!(
        by = %identity,
        movie_id,
        title = %movie.title,
        actors = movie.actors.len(),
        "Movie created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with("movie was created", CreatedMovie { movie_id })),
    ))
}

/// PUT /movie
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<UpdateMovieRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let movie = Movie::from(payload);
    state.movie_service().update(&movie).await?;

    info!(by = %identity, movie_id = movie.id, "Movie updated");
    Ok(Json(ApiResponse::ok("movie was updated")))
}

/// DELETE /movie
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<DeleteMovieRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.movie_service().delete(payload.movie_id).await?;

    info!(by = %identity, movie_id = payload.movie_id, "Movie deleted");
    Ok(Json(ApiResponse::ok("movie was deleted")))
}

/// GET /movie?title=&actor=
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieQuery>,
) -> Result<Json<MovieDto>, ApiError> {
    let search = validate_movie_search(query.title.as_deref(), query.actor.as_deref())?;
    let movie = state.movie_service().find(&search).await?;
    Ok(Json(MovieDto::from(movie)))
}

/// GET /movie/all?order=
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieListQuery>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    let order = validate_order(query.order.as_deref())?;
    let movies = state.movie_service().list(order).await?;
    Ok(Json(movies.into_iter().map(MovieDto::from).collect()))
}
