//! Mentor catalog routes.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use tracing::info;

use super::ApiError;
use super::extract::{ApiPath, ApiQuery};
use crate::services::mentor_filter::MentorFilter;
use crate::services::mentors::{Mentor, MentorCatalog};

pub fn router(catalog: Arc<MentorCatalog>) -> Router {
    Router::new()
        .route("/mentors", get(list_mentors))
        .route("/mentors/{id}", get(get_mentor))
        .with_state(catalog)
}

/// `GET /mentors?domain&seniority&badge`
pub async fn list_mentors(
    State(catalog): State<Arc<MentorCatalog>>,
    ApiQuery(filter): ApiQuery<MentorFilter>,
) -> Json<Vec<Mentor>> {
    let filter = filter.normalized();
    let mentors = catalog.search(&filter);
    info!(?filter, unfiltered = filter.is_empty(), count = mentors.len(), "mentor catalog search");
    Json(mentors)
}

/// `GET /mentors/:id`
pub async fn get_mentor(
    State(catalog): State<Arc<MentorCatalog>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Mentor>, ApiError> {
    catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Mentor not found"))
}

#[cfg(test)]
#[path = "mentors_test.rs"]
mod tests;
