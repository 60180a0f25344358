//! Code review routes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use sqlx::PgPool;
use tracing::{error, info};

use super::ApiError;
use super::extract::ApiJson;
use crate::services::code_reviews::{self, CodeReview, CodeReviewError, NewCodeReview};

pub fn router(pool: PgPool) -> Router {
    Router::new().route("/", post(create_review)).with_state(pool)
}

/// `POST /`: open a review request in `pending`.
pub async fn create_review(
    State(pool): State<PgPool>,
    ApiJson(body): ApiJson<NewCodeReview>,
) -> Result<(StatusCode, Json<CodeReview>), ApiError> {
    info!(mentor_id = body.mentor_id, mentee_id = body.mentee_id, "creating code review request");
    let review = code_reviews::create_review(&pool, body)
        .await
        .map_err(review_error_to_api)?;
    Ok((StatusCode::CREATED, Json(review)))
}

fn review_error_to_api(err: CodeReviewError) -> ApiError {
    match err {
        err @ CodeReviewError::InvalidUrl(_) => ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        CodeReviewError::Database(e) => {
            error!(error = %e, "code review insert failed");
            ApiError::internal("Internal server error creating code review request")
        }
    }
}

#[cfg(test)]
#[path = "code_reviews_test.rs"]
mod tests;
