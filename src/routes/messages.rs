//! Messaging routes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use sqlx::PgPool;
use tracing::error;

use super::ApiError;
use super::extract::{ApiJson, ApiPath};
use crate::services::messages::{self, Message, MessageError, NewMessage};

pub fn router(pool: PgPool) -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/conversation/{user_a}/{user_b}", get(get_conversation))
        .with_state(pool)
}

/// `POST /`
pub async fn send_message(
    State(pool): State<PgPool>,
    ApiJson(body): ApiJson<NewMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = messages::send_message(&pool, body)
        .await
        .map_err(|e| message_error_to_api(&e, "Internal server error sending message"))?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /conversation/:user_a/:user_b`: both directions, oldest first.
pub async fn get_conversation(
    State(pool): State<PgPool>,
    ApiPath((user_a, user_b)): ApiPath<(i64, i64)>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let conversation = messages::conversation(&pool, user_a, user_b)
        .await
        .map_err(|e| message_error_to_api(&e, "Internal server error fetching conversation"))?;
    Ok(Json(conversation))
}

fn message_error_to_api(err: &MessageError, detail: &'static str) -> ApiError {
    error!(error = %err, "messaging failure");
    ApiError::internal(detail)
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
