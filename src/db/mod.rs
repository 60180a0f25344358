//! Database initialization: pool, readiness polling, and table creation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Persisted services call `connect` before binding their listener. It
//! waits for Postgres to answer `SELECT 1` (bounded by the configured
//! `RetryPolicy`) and then creates the service's tables if they do not
//! exist. There are no migrations; every statement is idempotent.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::{DatabaseConfig, ServiceKind};
use crate::retry;

const USERS_SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS users (
        id              BIGSERIAL PRIMARY KEY,
        email           TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL,
        profile_type    TEXT NOT NULL DEFAULT 'mentee' CHECK (profile_type IN ('mentee', 'mentor')),
        seniority       TEXT,
        domains         TEXT,
        badges          TEXT
    )",
    "CREATE INDEX IF NOT EXISTS users_profile_type_idx ON users (profile_type)",
];

const MESSAGES_SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS messages (
        id          BIGSERIAL PRIMARY KEY,
        sender_id   BIGINT NOT NULL,
        receiver_id BIGINT NOT NULL,
        content     TEXT NOT NULL,
        sent_at     TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS messages_sender_receiver_idx ON messages (sender_id, receiver_id)",
    "CREATE INDEX IF NOT EXISTS messages_sent_at_idx ON messages (sent_at)",
];

const CODE_REVIEWS_SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS code_reviews (
        id         BIGSERIAL PRIMARY KEY,
        mentor_id  BIGINT NOT NULL,
        mentee_id  BIGINT NOT NULL,
        repo_url   TEXT NOT NULL,
        status     TEXT NOT NULL DEFAULT 'pending',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS code_reviews_mentor_idx ON code_reviews (mentor_id)",
    "CREATE INDEX IF NOT EXISTS code_reviews_mentee_idx ON code_reviews (mentee_id)",
];

/// DDL statements owned by a service. Empty for in-memory services.
#[must_use]
pub fn schema_for(service: ServiceKind) -> &'static [&'static str] {
    match service {
        ServiceKind::Users => USERS_SCHEMA,
        ServiceKind::Messaging => MESSAGES_SCHEMA,
        ServiceKind::CodeReview => CODE_REVIEWS_SCHEMA,
        ServiceKind::Mentors | ServiceKind::Bookings | ServiceKind::WebRtc => &[],
    }
}

/// Create the pool, wait for Postgres, and ensure the service's tables exist.
///
/// # Errors
///
/// Returns the last connection error if Postgres never becomes reachable, or
/// the DDL error if table creation fails.
pub async fn connect(config: &DatabaseConfig, service: ServiceKind) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)?;

    info!(attempts = config.readiness.max_attempts, "waiting for database");
    retry::retry(config.readiness, "database", || ping(&pool)).await?;
    info!("database is ready");

    ensure_schema(&pool, service).await?;
    Ok(pool)
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Run the service's idempotent DDL inside one transaction.
///
/// # Errors
///
/// Returns a database error if any statement fails; nothing is committed.
pub async fn ensure_schema(pool: &PgPool, service: ServiceKind) -> Result<(), sqlx::Error> {
    let statements = schema_for(service);
    if statements.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for statement in statements {
        sqlx::query(statement).execute(tx.as_mut()).await?;
    }
    tx.commit().await?;

    info!(%service, statements = statements.len(), "database schema ensured");
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
