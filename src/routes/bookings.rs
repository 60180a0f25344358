//! Booking routes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::json;
use tracing::warn;

use super::ApiError;
use super::extract::{ApiJson, ApiPath};
use crate::services::bookings::{Booking, BookingStore, CreateBookingError, NewBooking};

pub fn router(store: BookingStore) -> Router {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}/confirm", post(confirm_booking))
        .with_state(store)
}

/// `GET /bookings`
pub async fn list_bookings(State(store): State<BookingStore>) -> Json<Vec<Booking>> {
    Json(store.list().await)
}

/// `POST /bookings`: always stored as `pending`.
///
/// `start`/`end` are RFC 3339; values without an offset are taken as UTC.
pub async fn create_booking(
    State(store): State<BookingStore>,
    ApiJson(body): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = store.create(body).await.map_err(create_error_to_api)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub(crate) fn create_error_to_api(err: CreateBookingError) -> ApiError {
    warn!(error = %err, "booking rejected");
    match err {
        CreateBookingError::DuplicateId(_) => ApiError::new(StatusCode::CONFLICT, "Booking id already exists"),
        CreateBookingError::IdSpaceExhausted => {
            ApiError::new(StatusCode::CONFLICT, "No booking ids left; supply an explicit id")
        }
    }
}

/// `POST /bookings/:id/confirm`: `{ok, booking}` or 404 `{ok: false, error: "not_found"}`.
pub async fn confirm_booking(State(store): State<BookingStore>, ApiPath(id): ApiPath<i64>) -> Response {
    match store.confirm(id).await {
        Ok(booking) => Json(json!({ "ok": true, "booking": booking })).into_response(),
        Err(e) => {
            warn!(booking_id = id, error = %e, "confirm failed");
            (StatusCode::NOT_FOUND, Json(json!({ "ok": false, "error": "not_found" }))).into_response()
        }
    }
}

#[cfg(test)]
#[path = "bookings_test.rs"]
mod tests;
