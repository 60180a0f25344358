//! WebRTC signaling placeholder.
//!
//! No SDP offer/answer or ICE candidate exchange happens yet; the endpoint
//! only acknowledges the request so clients can be wired against it.

use serde::Serialize;
use tracing::info;

pub const PLACEHOLDER_MESSAGE: &str = "WebRTC signaling endpoint placeholder";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalAck {
    pub message: &'static str,
}

#[must_use]
pub fn acknowledge_signal() -> SignalAck {
    info!("received signal request (placeholder)");
    SignalAck { message: PLACEHOLDER_MESSAGE }
}
