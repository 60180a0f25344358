use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

use super::*;

fn app() -> Router {
    router(Arc::new(MentorCatalog::seeded()))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_without_filters_returns_all() {
    let (status, body) = get_json(app(), "/mentors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![11, 12, 13, 14]);
}

#[tokio::test]
async fn list_applies_all_filters() {
    let (_, body) = get_json(app(), "/mentors?seniority=senior&badge=system-design").await;
    assert_eq!(ids(&body), vec![11]);

    let (_, body) = get_json(app(), "/mentors?domain=frontend").await;
    assert_eq!(ids(&body), vec![13]);
    assert_eq!(body[0]["badges"], serde_json::json!(["system-design", "ui-review"]));
}

#[tokio::test]
async fn list_with_blank_filter_is_unfiltered() {
    let (_, body) = get_json(app(), "/mentors?domain=&badge=").await;
    assert_eq!(ids(&body).len(), 4);
}

#[tokio::test]
async fn list_no_match_is_empty_array() {
    let (status, body) = get_json(app(), "/mentors?domain=end").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn get_mentor_by_id() {
    let (status, body) = get_json(app(), "/mentors/12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Nimali");
}

#[tokio::test]
async fn get_unknown_mentor_is_404() {
    let (status, body) = get_json(app(), "/mentors/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Mentor not found");
}
