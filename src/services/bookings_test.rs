use time::macros::datetime;

use super::*;

fn request(id: Option<i64>) -> NewBooking {
    NewBooking {
        id,
        mentor_id: 11,
        mentee_id: 1,
        start: datetime!(2025-03-01 10:00 UTC),
        end: datetime!(2025-03-01 11:00 UTC),
    }
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn create_starts_pending() {
    let store = BookingStore::new();
    let booking = store.create(request(Some(1))).await.unwrap();
    assert_eq!(booking.id, 1);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(store.list().await, vec![booking]);
}

#[tokio::test]
async fn create_ignores_client_status() {
    let body = r#"{"id":3,"mentor_id":11,"mentee_id":1,
                   "start":"2025-03-01T10:00:00Z","end":"2025-03-01T11:00:00Z","status":"confirmed"}"#;
    let req: NewBooking = serde_json::from_str(body).unwrap();
    let booking = BookingStore::new().create(req).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn create_assigns_next_id_when_absent() {
    let store = BookingStore::new();
    assert_eq!(store.create(request(None)).await.unwrap().id, 1);
    assert_eq!(store.create(request(Some(10))).await.unwrap().id, 10);
    assert_eq!(store.create(request(None)).await.unwrap().id, 11);
}

#[tokio::test]
async fn create_without_id_after_max_id_is_exhausted() {
    let store = BookingStore::new();
    store.create(request(Some(i64::MAX))).await.unwrap();
    assert_eq!(store.create(request(None)).await, Err(CreateBookingError::IdSpaceExhausted));
    assert_eq!(store.list().await.len(), 1);

    // Explicit ids still work.
    assert_eq!(store.create(request(Some(5))).await.unwrap().id, 5);
}

#[tokio::test]
async fn create_rejects_duplicate_id() {
    let store = BookingStore::new();
    store.create(request(Some(1))).await.unwrap();
    assert_eq!(store.create(request(Some(1))).await, Err(CreateBookingError::DuplicateId(1)));
    assert_eq!(store.list().await.len(), 1);
}

// =============================================================================
// confirm
// =============================================================================

#[tokio::test]
async fn confirm_moves_pending_to_confirmed() {
    let store = BookingStore::new();
    store.create(request(Some(1))).await.unwrap();
    let confirmed = store.confirm(1).await.unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let listed = store.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn confirm_is_idempotent() {
    let store = BookingStore::new();
    store.create(request(Some(1))).await.unwrap();
    let first = store.confirm(1).await.unwrap();
    let second = store.confirm(1).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(second.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn confirm_unknown_id_is_not_found_and_mutates_nothing() {
    let store = BookingStore::new();
    store.create(request(Some(1))).await.unwrap();
    let before = store.list().await;

    assert_eq!(store.confirm(2).await, Err(BookingNotFound(2)));
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn confirm_only_touches_matching_booking() {
    let store = BookingStore::new();
    store.create(request(Some(1))).await.unwrap();
    store.create(request(Some(2))).await.unwrap();
    store.confirm(2).await.unwrap();

    let statuses: Vec<_> = store.list().await.into_iter().map(|b| (b.id, b.status)).collect();
    assert_eq!(statuses, vec![(1, BookingStatus::Pending), (2, BookingStatus::Confirmed)]);
}

#[tokio::test]
async fn clones_share_the_same_bookings() {
    let store = BookingStore::new();
    let other = store.clone();
    store.create(request(Some(4))).await.unwrap();
    assert_eq!(other.confirm(4).await.unwrap().status, BookingStatus::Confirmed);
}

// =============================================================================
// serialization
// =============================================================================

#[test]
fn booking_serializes_rfc3339_and_lowercase_status() {
    let booking = Booking {
        id: 1,
        mentor_id: 11,
        mentee_id: 1,
        start: datetime!(2025-03-01 10:00 UTC),
        end: datetime!(2025-03-01 11:00 UTC),
        status: BookingStatus::Pending,
    };
    let json = serde_json::to_value(&booking).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["start"], "2025-03-01T10:00:00Z");
    assert_eq!(json["end"], "2025-03-01T11:00:00Z");
}

#[test]
fn new_booking_reads_offsetless_timestamps_as_utc() {
    let body = r#"{"mentor_id":11,"mentee_id":1,"start":"2025-03-01T10:00:00","end":"2025-03-01 11:30:00"}"#;
    let req: NewBooking = serde_json::from_str(body).unwrap();
    assert_eq!(req.start, datetime!(2025-03-01 10:00 UTC));
    assert_eq!(req.end, datetime!(2025-03-01 11:30 UTC));
}

#[test]
fn new_booking_keeps_explicit_offsets() {
    let body = r#"{"mentor_id":11,"mentee_id":1,"start":"2025-03-01T12:00:00+02:00","end":"2025-03-01T11:00:00Z"}"#;
    let req: NewBooking = serde_json::from_str(body).unwrap();
    assert_eq!(req.start, datetime!(2025-03-01 10:00 UTC));
}

#[test]
fn new_booking_rejects_non_timestamps() {
    for start in ["tomorrow", "2025-03-01", "10:00:00", ""] {
        let body = format!(r#"{{"mentor_id":11,"mentee_id":1,"start":"{start}","end":"2025-03-01T11:00:00Z"}}"#);
        assert!(serde_json::from_str::<NewBooking>(&body).is_err(), "{start} should not parse");
    }
}
