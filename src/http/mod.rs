mod reservations;
mod rooms;
mod users;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::error::{Error, ErrorKind};
use crate::observability;
use crate::store::Store;

pub type SharedStore = Arc<RwLock<Store>>;

/// The full router. Handlers share the store behind one RwLock; a mutating
/// request holds the write lock across its whole validate-then-apply
/// sequence, so the conflict scan and the append are a single critical
/// section.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(rooms::routes())
        .merge(users::routes())
        .merge(reservations::routes())
        .route_layer(middleware::from_fn(track_metrics))
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "roomd",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "rooms": "/rooms",
            "users": "/users",
            "reservations": "/reservations",
            "availability": "/rooms/available",
        },
    }))
}

async fn unknown_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "route not found" })))
}

async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".into());

    let start = Instant::now();
    let response = next.run(req).await;

    metrics::counter!(
        observability::HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!(
        observability::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Handler failure: either a core rejection (status picked by error kind) or
/// an inbound-shape violation caught before the core runs (always 400).
pub(crate) enum ApiError {
    Domain(Error),
    Validation(String),
}

impl ApiError {
    pub(crate) fn validation(detail: impl Into<String>) -> Self {
        ApiError::Validation(detail.into())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Domain(err) => {
                if matches!(err, Error::SlotTaken { .. }) {
                    metrics::counter!(observability::RESERVATION_CONFLICTS_TOTAL).increment(1);
                }
                let status = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Conflict => StatusCode::CONFLICT,
                    ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            ApiError::Validation(detail) => (StatusCode::BAD_REQUEST, detail),
        };
        (status, Json(json!({ "error": detail }))).into_response()
    }
}

// ── Inbound field validation ─────────────────────────────
//
// The core assumes well-formed values and re-validates only business
// semantics, so shape is enforced here.

pub(crate) fn require_trimmed(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn require_positive(field: &str, value: u32) -> Result<u32, ApiError> {
    if value < 1 {
        return Err(ApiError::validation(format!(
            "{field} must be an integer greater than 0"
        )));
    }
    Ok(value)
}

/// Strict `YYYY-MM-DD`, and a real calendar date.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    let b = value.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return Err(ApiError::validation(format!(
            "{field} must be in YYYY-MM-DD format"
        )));
    }
    value
        .parse()
        .map_err(|_| ApiError::validation(format!("{field} is not a valid calendar date")))
}

/// Strict zero-padded `HH:MM`, hour 00-23, minute 00-59.
pub(crate) fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ApiError> {
    let b = value.as_bytes();
    let shaped = b.len() == 5
        && b[2] == b':'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || c.is_ascii_digit());
    if !shaped {
        return Err(ApiError::validation(format!(
            "{field} must be in HH:MM format"
        )));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ApiError::validation(format!("{field} is not a valid time of day")))
}
