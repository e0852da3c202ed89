use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Entity, Error};
use crate::model::Id;
use crate::registry::UserPatch;

use super::{require_trimmed, ApiError, SharedStore};

pub(super) fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_one).put(update).delete(delete_one))
}

#[derive(Deserialize)]
struct CreateUserBody {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct UpdateUserBody {
    name: Option<String>,
    email: Option<String>,
}

async fn create(
    State(store): State<SharedStore>,
    Json(body): Json<CreateUserBody>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_trimmed("name", &body.name)?;
    let email = require_trimmed("email", &body.email)?;

    let mut store = store.write().await;
    let user = store.users.create(name, email)?;
    tracing::info!(user_id = user.id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user created", "user": user })),
    ))
}

async fn list(State(store): State<SharedStore>) -> impl IntoResponse {
    let store = store.read().await;
    Json(store.users.list().to_vec())
}

async fn get_one(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let store = store.read().await;
    let user = store
        .users
        .get(id)
        .cloned()
        .ok_or(Error::NotFound(Entity::User, id))?;
    Ok(Json(user))
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
    Json(body): Json<UpdateUserBody>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = UserPatch {
        name: body
            .name
            .as_deref()
            .map(|n| require_trimmed("name", n))
            .transpose()?,
        email: body
            .email
            .as_deref()
            .map(|e| require_trimmed("email", e))
            .transpose()?,
    };

    let mut store = store.write().await;
    let user = store.users.update(id, patch)?;
    Ok(Json(json!({ "message": "user updated", "user": user })))
}

async fn delete_one(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = store.write().await;
    let user = store.users.delete(id)?;
    tracing::info!(user_id = id, "user deleted");
    Ok(Json(json!({ "message": "user deleted", "user": user })))
}
