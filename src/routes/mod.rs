//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One router per service. `app` picks the router for the hosted service,
//! adds `GET /health`, and wraps everything in the shared CORS and trace
//! layers. Failures render as `{"detail": "..."}` through `ApiError`,
//! including malformed requests (see `extract`). Internal error text goes
//! to the log, never to the client.

pub mod bookings;
pub mod code_reviews;
pub mod extract;
pub mod mentors;
pub mod messages;
pub mod signaling;
pub mod users;

use std::borrow::Cow;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServiceKind;
use crate::state::ServiceState;

// =============================================================================
// ERRORS
// =============================================================================

/// Client-facing failure: a status code plus a generic `detail` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: Cow<'static, str>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<Cow<'static, str>>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn internal(detail: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full router for the hosted service.
pub fn app(state: ServiceState) -> Router {
    let kind = state.kind();
    let service_routes = match state {
        ServiceState::Users(pool) => users::router(pool),
        ServiceState::Mentors(catalog) => mentors::router(catalog),
        ServiceState::Bookings(store) => bookings::router(store),
        ServiceState::Messaging(pool) => messages::router(pool),
        ServiceState::CodeReview(pool) => code_reviews::router(pool),
        ServiceState::WebRtc => signaling::router(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    service_routes
        .route("/health", get(move || health(kind)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health(kind: ServiceKind) -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "status": format!("{kind} is running") }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
