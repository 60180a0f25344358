//! User directory routes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{error, info};

use super::ApiError;
use super::extract::{ApiJson, ApiQuery};
use crate::services::mentor_filter::MentorFilter;
use crate::services::users::{self, NewUser, User, UserError};

pub const LOGIN_FAILED: &str = "Incorrect email or password";

pub fn router(pool: PgPool) -> Router {
    Router::new()
        .route("/", post(create_user))
        .route("/login", post(login))
        .route("/mentors", get(list_mentors))
        .with_state(pool)
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// `POST /`: register a user.
pub async fn create_user(
    State(pool): State<PgPool>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!(email = %body.email, profile_type = body.profile_type.as_str(), "creating user");
    let user = users::create_user(&pool, body)
        .await
        .map_err(|e| user_error_to_api(e, "Internal server error creating user"))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /login`: check credentials and return the user.
pub async fn login(State(pool): State<PgPool>, ApiJson(body): ApiJson<LoginBody>) -> Result<Json<User>, ApiError> {
    info!(email = %body.email, "login attempt");
    let user = users::login(&pool, &body.email, &body.password)
        .await
        .map_err(|e| user_error_to_api(e, "Internal server error during login"))?;
    Ok(Json(user))
}

/// `GET /mentors?domain&seniority&badge`: search mentor profiles.
pub async fn list_mentors(
    State(pool): State<PgPool>,
    ApiQuery(filter): ApiQuery<MentorFilter>,
) -> Result<Json<Vec<User>>, ApiError> {
    let filter = filter.normalized();
    info!(?filter, unfiltered = filter.is_empty(), "searching mentors");
    let mentors = users::search_mentors(&pool, &filter)
        .await
        .map_err(|e| user_error_to_api(e, "Could not fetch mentors"))?;
    info!(count = mentors.len(), "mentors found");
    Ok(Json(mentors))
}

pub(crate) fn user_error_to_api(err: UserError, internal_detail: &'static str) -> ApiError {
    match err {
        UserError::Validation(msg) => ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, msg),
        UserError::EmailTaken => ApiError::new(StatusCode::CONFLICT, "Email already registered"),
        UserError::InvalidCredentials => ApiError::new(StatusCode::UNAUTHORIZED, LOGIN_FAILED),
        err @ (UserError::CorruptRow { .. } | UserError::Password(_) | UserError::Database(_)) => {
            error!(error = %err, "user service failure");
            ApiError::internal(internal_detail)
        }
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
