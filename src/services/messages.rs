//! Messaging service — direct messages and two-party conversations.
//!
//! DESIGN
//! ======
//! Messages are immutable rows in `messages`; the server assigns `sent_at`
//! (exposed as `timestamp`). A conversation between A and B is every
//! message sent A→B or B→A, oldest first, with `id` breaking timestamp
//! ties. The pair needs no canonical order: `(a, b)` and `(b, a)` select
//! the same rows in the same order.
//!
//! Any caller may read any pair; there is no participant check here.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
}

/// Store a message and return it with its id and server timestamp.
///
/// # Errors
///
/// Returns a database error if the insert fails; nothing is committed.
pub async fn send_message(pool: &PgPool, message: NewMessage) -> Result<Message, MessageError> {
    let mut tx = pool.begin().await?;
    let stored = sqlx::query_as::<_, Message>(
        "INSERT INTO messages (sender_id, receiver_id, content)
         VALUES ($1, $2, $3)
         RETURNING id, sender_id, receiver_id, content, sent_at",
    )
    .bind(message.sender_id)
    .bind(message.receiver_id)
    .bind(&message.content)
    .fetch_one(tx.as_mut())
    .await?;
    tx.commit().await?;

    info!(message_id = stored.id, sender_id = stored.sender_id, receiver_id = stored.receiver_id, "message sent");
    Ok(stored)
}

/// All messages exchanged between `a` and `b`, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn conversation(pool: &PgPool, a: i64, b: i64) -> Result<Vec<Message>, MessageError> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT id, sender_id, receiver_id, content, sent_at
         FROM messages
         WHERE (sender_id = $1 AND receiver_id = $2)
            OR (sender_id = $2 AND receiver_id = $1)
         ORDER BY sent_at ASC, id ASC",
    )
    .bind(a)
    .bind(b)
    .fetch_all(pool)
    .await?;

    info!(a, b, count = messages.len(), "conversation fetched");
    Ok(messages)
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
