use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::info;

use super::extract::JsonBody;
use super::{
    ActorWithMovieDto, ApiError, ApiResponse, AppState, CreateActorRequest, CreatedActor,
    DeleteActorRequest, UpdateActorRequest,
};
use crate::models::{Actor, Identity, NewActor};

/// GET /actor
pub async fn list_actors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActorWithMovieDto>>, ApiError> {
    let rows = state.actor_service().list_with_movies().await?;
    Ok(Json(rows.into_iter().map(ActorWithMovieDto::from).collect()))
}

/// POST /actor
pub async fn create_actor(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<CreateActorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedActor>>), ApiError> {
    let actor = NewActor::from(payload);
    let actor_id = state.actor_service().create(&actor).await?;

    info!(by = %identity, actor_id, name = %actor.name, "Actor created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with("actor was created", CreatedActor { actor_id })),
    ))
}

/// PUT /actor
pub async fn update_actor(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<UpdateActorRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let actor = Actor::from(payload);
    state.actor_service().update(&actor).await?;

    info!(by = %identity, actor_id = actor.id, "Actor updated");
    Ok(Json(ApiResponse::ok("actor was updated")))
}

/// DELETE /actor
pub async fn delete_actor(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    JsonBody(payload): JsonBody<DeleteActorRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.actor_service().delete(payload.actor_id).await?;

    info!(by = %identity, actor_id = payload.actor_id, "Actor deleted");
    Ok(Json(ApiResponse::ok("actor was deleted")))
}
