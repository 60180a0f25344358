//! Extractors whose rejections render as `ApiError`.
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text bodies that
//! quote deserializer internals. These wrappers keep axum's status code,
//! log the original text, and answer with a short `{"detail": ...}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::ApiError;

pub const INVALID_JSON_BODY: &str = "Request body is not valid JSON";
pub const INVALID_BODY_SHAPE: &str = "Request body is missing fields or has invalid values";
pub const EXPECTED_JSON: &str = "Expected `Content-Type: application/json`";
pub const UNREADABLE_BODY: &str = "Request body could not be read";
pub const INVALID_PATH: &str = "Invalid path parameter";
pub const INVALID_QUERY: &str = "Invalid query string";

/// JSON request body.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| json_rejection_to_api(&e))?;
        Ok(Self(value))
    }
}

/// Typed path parameters.
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| path_rejection_to_api(&e))?;
        Ok(Self(value))
    }
}

/// Typed query string.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| query_rejection_to_api(&e))?;
        Ok(Self(value))
    }
}

pub(crate) fn json_rejection_to_api(rejection: &JsonRejection) -> ApiError {
    warn!(reason = %rejection.body_text(), "rejected request body");
    let detail = match rejection {
        JsonRejection::JsonDataError(_) => INVALID_BODY_SHAPE,
        JsonRejection::JsonSyntaxError(_) => INVALID_JSON_BODY,
        JsonRejection::MissingJsonContentType(_) => EXPECTED_JSON,
        _ => UNREADABLE_BODY,
    };
    ApiError::new(rejection.status(), detail)
}

pub(crate) fn path_rejection_to_api(rejection: &PathRejection) -> ApiError {
    warn!(reason = %rejection.body_text(), "rejected path parameters");
    ApiError::new(rejection.status(), INVALID_PATH)
}

pub(crate) fn query_rejection_to_api(rejection: &QueryRejection) -> ApiError {
    warn!(reason = %rejection.body_text(), "rejected query string");
    ApiError::new(rejection.status(), INVALID_QUERY)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
