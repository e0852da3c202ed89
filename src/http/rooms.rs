use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Entity, Error};
use crate::model::{Id, RoomStatus};
use crate::registry::{NewRoom, RoomPatch};

use super::{require_positive, require_trimmed, ApiError, SharedStore};

pub(super) fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/rooms", get(list).post(create))
        .route("/rooms/:id", get(get_one).put(update).delete(delete_one))
}

#[derive(Deserialize)]
struct CreateRoomBody {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    capacity: u32,
    status: Option<String>,
}

#[derive(Deserialize)]
struct UpdateRoomBody {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    capacity: Option<u32>,
    status: Option<String>,
}

fn parse_status(value: &str) -> Result<RoomStatus, ApiError> {
    match value {
        "active" => Ok(RoomStatus::Active),
        "inactive" => Ok(RoomStatus::Inactive),
        _ => Err(ApiError::validation(
            "status must be \"active\" or \"inactive\"",
        )),
    }
}

async fn create(
    State(store): State<SharedStore>,
    Json(body): Json<CreateRoomBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_trimmed("name", &body.name)?;
    let kind = require_trimmed("type", &body.kind)?;
    let capacity = require_positive("capacity", body.capacity)?;
    let status = body.status.as_deref().map(parse_status).transpose()?;

    let mut store = store.write().await;
    // Name uniqueness on create lives at this layer, in front of the registry.
    if store.rooms.contains_name(&name) {
        return Err(Error::RoomNameTaken(name).into());
    }
    let room = store.rooms.create(NewRoom {
        name,
        kind,
        capacity,
        status,
    });
    tracing::info!(room_id = room.id, name = %room.name, "room created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "room created", "room": room })),
    ))
}

async fn list(State(store): State<SharedStore>) -> impl IntoResponse {
    let store = store.read().await;
    Json(store.rooms.list().to_vec())
}

async fn get_one(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let store = store.read().await;
    let room = store
        .rooms
        .get(id)
        .cloned()
        .ok_or(Error::NotFound(Entity::Room, id))?;
    Ok(Json(room))
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
    Json(body): Json<UpdateRoomBody>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = RoomPatch {
        name: body
            .name
            .as_deref()
            .map(|n| require_trimmed("name", n))
            .transpose()?,
        kind: body
            .kind
            .as_deref()
            .map(|k| require_trimmed("type", k))
            .transpose()?,
        capacity: body
            .capacity
            .map(|c| require_positive("capacity", c))
            .transpose()?,
        status: body.status.as_deref().map(parse_status).transpose()?,
    };

    let mut store = store.write().await;
    let room = store.rooms.update(id, patch)?;
    Ok(Json(json!({ "message": "room updated", "room": room })))
}

async fn delete_one(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = store.write().await;
    let room = store.rooms.delete(id)?;
    tracing::info!(room_id = id, "room deleted");
    Ok(Json(json!({ "message": "room deleted", "room": room })))
}
