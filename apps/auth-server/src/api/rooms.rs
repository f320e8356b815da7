// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Room inventory.
//!
//! Reads are public. Every write, deletion included, needs a signed-in caller
//! of any role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::require_caller;
use crate::{
    auth::OptionalAuth,
    error::ApiError,
    models::{Room, RoomInput},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/rooms",
    tag = "Rooms",
    responses((status = 200, body = [Room]))
)]
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<Room>> {
    Json(state.store.read().await.list_rooms())
}

#[utoipa::path(
    get,
    path = "/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier")),
    tag = "Rooms",
    responses(
        (status = 200, body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Room>, ApiError> {
    Ok(Json(state.store.read().await.get_room(&id)?))
}

#[utoipa::path(
    post,
    path = "/v1/rooms",
    request_body = RoomInput,
    tag = "Rooms",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Room),
        (status = 400, description = "Invalid room data"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(input): Json<RoomInput>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let caller = require_caller(caller, "create rooms")?;
    input.validate().map_err(ApiError::bad_request)?;

    let room = state.store.write().await.create_room(input);
    tracing::info!(room_id = %room.id, user_id = %caller.user_id, "Created room");
    Ok((StatusCode::CREATED, Json(room)))
}

#[utoipa::path(
    put,
    path = "/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = RoomInput,
    tag = "Rooms",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Room),
        (status = 400, description = "Invalid room data"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    Path(id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(input): Json<RoomInput>,
) -> Result<Json<Room>, ApiError> {
    let caller = require_caller(caller, "update rooms")?;
    input.validate().map_err(ApiError::bad_request)?;

    let room = state.store.write().await.update_room(&id, input)?;
    tracing::info!(room_id = %room.id, user_id = %caller.user_id, "Updated room");
    Ok(Json(room))
}

#[utoipa::path(
    delete,
    path = "/v1/rooms/{id}",
    params(("id" = String, Path, description = "Room identifier")),
    tag = "Rooms",
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn delete_room(
    Path(id): Path<String>,
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
) -> Result<StatusCode, ApiError> {
    let caller = require_caller(caller, "delete rooms")?;

    state.store.write().await.delete_room(&id)?;
    tracing::info!(room_id = %id, user_id = %caller.user_id, "Deleted room");
    Ok(StatusCode::NO_CONTENT)
}
