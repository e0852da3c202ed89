use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::engine::{NewReservation, ReservationPatch};
use crate::error::{Entity, Error};
use crate::model::{Id, Slot};
use crate::observability;
use crate::store::Store;

use super::{parse_date, parse_time, require_positive, require_trimmed, ApiError, SharedStore};

pub(super) fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/reservations", get(list).post(create))
        .route(
            "/reservations/:id",
            get(get_one).put(update).delete(cancel),
        )
        .route("/rooms/available", get(available))
}

#[derive(Deserialize)]
struct CreateReservationBody {
    user_id: Id,
    room_id: Id,
    date: String,
    start_time: String,
    end_time: String,
    reason: String,
}

#[derive(Deserialize)]
struct UpdateReservationBody {
    date: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    reason: Option<String>,
}

#[derive(Deserialize)]
struct ListFilter {
    room_id: Option<Id>,
    date: Option<String>,
    user_id: Option<Id>,
}

#[derive(Deserialize)]
struct AvailabilityQuery {
    date: String,
    start_time: String,
    end_time: String,
}

fn live_gauge(store: &Store) {
    metrics::gauge!(observability::RESERVATIONS_LIVE).set(store.reservations.list().len() as f64);
}

async fn create(
    State(store): State<SharedStore>,
    Json(body): Json<CreateReservationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_positive("user_id", body.user_id)?;
    let room_id = require_positive("room_id", body.room_id)?;
    let date = parse_date("date", &body.date)?;
    let start_time = parse_time("start_time", &body.start_time)?;
    let end_time = parse_time("end_time", &body.end_time)?;
    let reason = require_trimmed("reason", &body.reason)?;

    let mut store = store.write().await;
    let Store {
        rooms,
        users,
        reservations,
    } = &mut *store;
    let reservation = reservations.create(
        &*rooms,
        &*users,
        NewReservation {
            user_id,
            room_id,
            date,
            start_time,
            end_time,
            reason,
        },
    )?;
    tracing::info!(
        reservation_id = reservation.id,
        room_id,
        %date,
        "reservation created"
    );
    live_gauge(&store);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "reservation created", "reservation": reservation })),
    ))
}

/// `room_id` together with `date` filters one room's day; otherwise
/// `user_id` filters one user's bookings; otherwise everything is returned.
async fn list(
    State(store): State<SharedStore>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let store = store.read().await;
    if let (Some(room_id), Some(date)) = (filter.room_id, filter.date.as_deref()) {
        let date = parse_date("date", date)?;
        return Ok(Json(store.reservations.by_room_and_date(room_id, date)));
    }
    if let Some(user_id) = filter.user_id {
        return Ok(Json(store.reservations.by_user(user_id)));
    }
    Ok(Json(store.reservations.list().to_vec()))
}

async fn get_one(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let store = store.read().await;
    let reservation = store
        .reservations
        .get(id)
        .cloned()
        .ok_or(Error::NotFound(Entity::Reservation, id))?;
    Ok(Json(reservation))
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
    Json(body): Json<UpdateReservationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = ReservationPatch {
        date: body
            .date
            .as_deref()
            .map(|d| parse_date("date", d))
            .transpose()?,
        start_time: body
            .start_time
            .as_deref()
            .map(|t| parse_time("start_time", t))
            .transpose()?,
        end_time: body
            .end_time
            .as_deref()
            .map(|t| parse_time("end_time", t))
            .transpose()?,
        reason: body
            .reason
            .as_deref()
            .map(|r| require_trimmed("reason", r))
            .transpose()?,
    };

    let mut store = store.write().await;
    let reservation = store.reservations.update(id, patch)?;
    Ok(Json(
        json!({ "message": "reservation updated", "reservation": reservation }),
    ))
}

async fn cancel(
    State(store): State<SharedStore>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = store.write().await;
    let reservation = store.reservations.cancel(id)?;
    tracing::info!(reservation_id = id, "reservation cancelled");
    live_gauge(&store);
    Ok(Json(
        json!({ "message": "reservation cancelled", "reservation": reservation }),
    ))
}

/// Active rooms free in the window. The inverted-window rejection lives
/// here: the engine's availability query assumes an ordered window and does
/// not restrict past dates.
async fn available(
    State(store): State<SharedStore>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date("date", &query.date)?;
    let start = parse_time("start_time", &query.start_time)?;
    let end = parse_time("end_time", &query.end_time)?;
    if end <= start {
        return Err(ApiError::validation("end time must be after start time"));
    }

    let store = store.read().await;
    let rooms = store
        .reservations
        .available_rooms(&store.rooms, date, Slot::new(start, end));
    Ok(Json(json!({
        "date": query.date,
        "start_time": query.start_time,
        "end_time": query.end_time,
        "available_rooms": rooms,
    })))
}
