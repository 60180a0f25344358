//! Code review requests — a mentee asks a mentor to review a repository.
//!
//! Requests are create-only. The repository link must be an absolute
//! `http`/`https` URL; it is stored in normalized form. Status starts as
//! `pending` and `created_at` is assigned by Postgres.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use url::Url;

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, thiserror::Error)]
pub enum CodeReviewError {
    #[error("repo_url: {0}")]
    InvalidUrl(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CodeReview {
    pub id: i64,
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub repo_url: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCodeReview {
    pub mentor_id: i64,
    pub mentee_id: i64,
    pub repo_url: String,
}

/// Parse and normalize a repository URL.
///
/// # Errors
///
/// Returns `InvalidUrl` for unparseable URLs, non-HTTP schemes, or URLs
/// without a host.
pub fn normalize_repo_url(raw: &str) -> Result<String, CodeReviewError> {
    let url = Url::parse(raw.trim()).map_err(|e| CodeReviewError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CodeReviewError::InvalidUrl(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CodeReviewError::InvalidUrl("missing host".into()));
    }
    Ok(url.to_string())
}

/// Create a review request.
///
/// # Errors
///
/// Returns `InvalidUrl` for a bad link or a database error if the insert
/// fails; nothing is committed on error.
pub async fn create_review(pool: &PgPool, request: NewCodeReview) -> Result<CodeReview, CodeReviewError> {
    let repo_url = normalize_repo_url(&request.repo_url)?;

    let mut tx = pool.begin().await?;
    let review = sqlx::query_as::<_, CodeReview>(
        "INSERT INTO code_reviews (mentor_id, mentee_id, repo_url, status)
         VALUES ($1, $2, $3, $4)
         RETURNING id, mentor_id, mentee_id, repo_url, status, created_at",
    )
    .bind(request.mentor_id)
    .bind(request.mentee_id)
    .bind(&repo_url)
    .bind(DEFAULT_STATUS)
    .fetch_one(tx.as_mut())
    .await?;
    tx.commit().await?;

    info!(review_id = review.id, mentor_id = review.mentor_id, mentee_id = review.mentee_id, "code review requested");
    Ok(review)
}

#[cfg(test)]
#[path = "code_reviews_test.rs"]
mod tests;
