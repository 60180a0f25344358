//! WebRTC signaling route (placeholder).

use axum::Router;
use axum::response::Json;
use axum::routing::post;

use crate::services::signaling::{self, SignalAck};

pub fn router() -> Router {
    Router::new().route("/signal", post(signal))
}

/// `POST /signal`: acknowledges any body.
pub async fn signal() -> Json<SignalAck> {
    Json(signaling::acknowledge_signal())
}
