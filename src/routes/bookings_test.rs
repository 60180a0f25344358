use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

use super::*;

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_owned())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

const BOOKING_ONE: &str = r#"{
    "id": 1,
    "mentor_id": 11,
    "mentee_id": 1,
    "start": "2025-03-01T10:00:00Z",
    "end": "2025-03-01T11:00:00Z"
}"#;

#[tokio::test]
async fn create_confirm_list_flow() {
    let app = router(BookingStore::new());

    let (status, created) = send(&app, "POST", "/bookings", Some(BOOKING_ONE)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["status"], "pending");

    let (status, confirmed) = send(&app, "POST", "/bookings/1/confirm", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["ok"], true);
    assert_eq!(confirmed["booking"]["status"], "confirmed");

    let (status, listed) = send(&app, "GET", "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "confirmed");
    assert_eq!(listed[0]["start"], "2025-03-01T10:00:00Z");
}

#[tokio::test]
async fn client_status_is_ignored() {
    let app = router(BookingStore::new());
    let body = r#"{"mentor_id":11,"mentee_id":2,"start":"2025-03-02T09:00:00Z","end":"2025-03-02T10:00:00Z","status":"confirmed"}"#;
    let (status, created) = send(&app, "POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn duplicate_id_is_conflict() {
    let app = router(BookingStore::new());
    send(&app, "POST", "/bookings", Some(BOOKING_ONE)).await;
    let (status, body) = send(&app, "POST", "/bookings", Some(BOOKING_ONE)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let (_, listed) = send(&app, "GET", "/bookings", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn confirm_unknown_is_not_found() {
    let app = router(BookingStore::new());
    let (status, body) = send(&app, "POST", "/bookings/42/confirm", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "ok": false, "error": "not_found" }));
}

#[tokio::test]
async fn empty_list_is_empty_array() {
    let app = router(BookingStore::new());
    let (status, body) = send(&app, "GET", "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn malformed_timestamp_is_rejected_with_detail() {
    let app = router(BookingStore::new());
    let body = r#"{"mentor_id":11,"mentee_id":1,"start":"tomorrow","end":"2025-03-01T11:00:00Z"}"#;
    let (status, body) = send(&app, "POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], crate::routes::extract::INVALID_BODY_SHAPE);
}

#[tokio::test]
async fn offsetless_timestamp_is_stored_as_utc() {
    let app = router(BookingStore::new());
    let body = r#"{"mentor_id":11,"mentee_id":1,"start":"2025-03-01T10:00:00","end":"2025-03-01T11:00:00"}"#;
    let (status, created) = send(&app, "POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["start"], "2025-03-01T10:00:00Z");
}

#[tokio::test]
async fn exhausted_id_space_is_conflict_not_panic() {
    let app = router(BookingStore::new());
    let max = format!(
        r#"{{"id":{},"mentor_id":11,"mentee_id":1,"start":"2025-03-01T10:00:00Z","end":"2025-03-01T11:00:00Z"}}"#,
        i64::MAX
    );
    let (status, _) = send(&app, "POST", "/bookings", Some(&max)).await;
    assert_eq!(status, StatusCode::CREATED);

    let without_id = r#"{"mentor_id":11,"mentee_id":2,"start":"2025-03-02T10:00:00Z","end":"2025-03-02T11:00:00Z"}"#;
    let (status, body) = send(&app, "POST", "/bookings", Some(without_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let (_, listed) = send(&app, "GET", "/bookings", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn confirm_with_non_numeric_id_renders_detail() {
    let app = router(BookingStore::new());
    let (status, body) = send(&app, "POST", "/bookings/abc/confirm", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], crate::routes::extract::INVALID_PATH);
}
