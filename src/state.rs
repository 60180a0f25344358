//! Per-process service state.
//!
//! DESIGN
//! ======
//! Each process hosts exactly one service, so state is an enum of the
//! resources that service owns: a `PgPool` for persisted services, an owned
//! in-memory store otherwise. The router for the chosen variant receives
//! its resource through axum's `State` extractor; nothing is global.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServiceKind;
use crate::services::bookings::BookingStore;
use crate::services::mentors::MentorCatalog;

#[derive(Clone)]
pub enum ServiceState {
    Users(PgPool),
    Mentors(Arc<MentorCatalog>),
    Bookings(BookingStore),
    Messaging(PgPool),
    CodeReview(PgPool),
    WebRtc,
}

impl ServiceState {
    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Users(_) => ServiceKind::Users,
            Self::Mentors(_) => ServiceKind::Mentors,
            Self::Bookings(_) => ServiceKind::Bookings,
            Self::Messaging(_) => ServiceKind::Messaging,
            Self::CodeReview(_) => ServiceKind::CodeReview,
            Self::WebRtc => ServiceKind::WebRtc,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
