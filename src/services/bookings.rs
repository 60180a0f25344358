//! Booking service — in-memory session bookings with a confirm transition.
//!
//! DESIGN
//! ======
//! `BookingStore` owns the booking list behind an `Arc<RwLock<_>>` and is
//! cloned into router state. New bookings always start `pending`; any
//! status the client sends is ignored. `confirm` looks up and mutates under
//! a single write lock, so an unknown id never changes anything.
//!
//! Lifecycle: `pending -> confirmed`. Confirming twice is a no-op success.
//!
//! Request timestamps are RFC 3339. Values without an offset
//! (`2025-03-01T10:00:00`, `2025-03-01 10:00:00`) are read as UTC.
//! Responses always carry the offset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CreateBookingError {
    #[error("booking id already exists: {0}")]
    DuplicateId(i64),
    #[error("no booking ids left after {}", i64::MAX)]
    IdSpaceExhausted,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("booking not found: {0}")]
pub struct BookingNotFound(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub status: BookingStatus,
}

impl Booking {
    /// Move to `confirmed`. Already-confirmed bookings stay confirmed.
    pub fn confirm(&mut self) {
        self.status = BookingStatus::Confirmed;
    }
}

/// Booking request. `id` is optional; `status` is not read.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    #[serde(default)]
    pub id: Option<i64>,
    pub mentor_id: i64,
    pub mentee_id: i64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start: OffsetDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end: OffsetDateTime,
}

mod timestamp {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use time::format_description::well_known::{Iso8601, Rfc3339};
    use time::macros::format_description;
    use time::{OffsetDateTime, PrimitiveDateTime};

    /// RFC 3339, or an offset-less ISO 8601 date-time taken as UTC.
    pub(super) fn parse(raw: &str) -> Option<OffsetDateTime> {
        let raw = raw.trim();
        if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(at);
        }
        let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
            .or_else(|_| PrimitiveDateTime::parse(raw, spaced))
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom("expected an ISO 8601 date-time"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl BookingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new `pending` booking. Without an id, the next free id
    /// (`max + 1`, starting at 1) is assigned.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the supplied id is already taken, or
    /// `IdSpaceExhausted` if no id is supplied and the largest stored id is
    /// `i64::MAX`.
    pub async fn create(&self, request: NewBooking) -> Result<Booking, CreateBookingError> {
        let mut bookings = self.bookings.write().await;

        let id = match request.id {
            Some(id) if bookings.iter().any(|b| b.id == id) => return Err(CreateBookingError::DuplicateId(id)),
            Some(id) => id,
            None => bookings
                .iter()
                .map(|b| b.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(CreateBookingError::IdSpaceExhausted)?,
        };

        let booking = Booking {
            id,
            mentor_id: request.mentor_id,
            mentee_id: request.mentee_id,
            start: request.start,
            end: request.end,
            status: BookingStatus::Pending,
        };
        bookings.push(booking.clone());

        info!(booking_id = id, mentor_id = booking.mentor_id, mentee_id = booking.mentee_id, "booking created");
        Ok(booking)
    }

    /// All bookings in creation order.
    pub async fn list(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    /// Confirm booking `id` and return its new state.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if no booking has that id; nothing is mutated.
    pub async fn confirm(&self, id: i64) -> Result<Booking, BookingNotFound> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BookingNotFound(id))?;
        booking.confirm();
        info!(booking_id = id, "booking confirmed");
        Ok(booking.clone())
    }
}

#[cfg(test)]
#[path = "bookings_test.rs"]
mod tests;
