//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on request parsing and status mapping. Each
//! process hosts one service; the modules share only `tags` and
//! `mentor_filter`.

pub mod bookings;
pub mod code_reviews;
pub mod mentor_filter;
pub mod mentors;
pub mod messages;
pub mod password;
pub mod signaling;
pub mod tags;
pub mod users;
