//! Startup configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every service reads the same small set of variables. Required values
//! (`SERVICE`, and `DATABASE_URL` for persisted services) fail startup when
//! missing or malformed; tuning knobs fall back to defaults via `env_parse`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_DB_CONNECT_ATTEMPTS: u32 = 30;
pub const DEFAULT_DB_CONNECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_DB_CONNECT_MAX_DELAY_MS: u64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("unknown SERVICE '{0}' (expected users, mentors, bookings, messaging, code-review or webrtc)")]
    UnknownService(String),
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
}

// =============================================================================
// SERVICE KIND
// =============================================================================

/// The service hosted by this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Users,
    Mentors,
    Bookings,
    Messaging,
    CodeReview,
    WebRtc,
}

impl ServiceKind {
    /// Whether the service is backed by Postgres.
    #[must_use]
    pub fn needs_database(self) -> bool {
        matches!(self, Self::Users | Self::Messaging | Self::CodeReview)
    }

    /// Human-readable name used in health responses and logs.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Users => "User-Service",
            Self::Mentors => "Mentor-Service",
            Self::Bookings => "Booking-Service",
            Self::Messaging => "Messaging-Service",
            Self::CodeReview => "Code-Review-Service",
            Self::WebRtc => "WebRTC-Service",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

pub(crate) fn parse_service(raw: Option<&str>) -> Result<ServiceKind, ConfigError> {
    let Some(raw) = raw else {
        return Err(ConfigError::Missing("SERVICE"));
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "users" | "user" => Ok(ServiceKind::Users),
        "mentors" | "mentor" => Ok(ServiceKind::Mentors),
        "bookings" | "booking" => Ok(ServiceKind::Bookings),
        "messaging" | "messages" => Ok(ServiceKind::Messaging),
        "code-review" | "code_review" | "code-reviews" => Ok(ServiceKind::CodeReview),
        "webrtc" => Ok(ServiceKind::WebRtc),
        other => Err(ConfigError::UnknownService(other.to_owned())),
    }
}

pub(crate) fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub readiness: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub service: ServiceKind,
    pub port: u16,
    /// Present only for services that need Postgres.
    pub database: Option<DatabaseConfig>,
    /// Optional JSON seed file for the mentor catalog.
    pub mentor_catalog_path: Option<PathBuf>,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SERVICE`
    /// - `DATABASE_URL` (users, messaging, code-review)
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `DB_CONNECT_ATTEMPTS`: default 30
    /// - `DB_CONNECT_DELAY_MS` / `DB_CONNECT_MAX_DELAY_MS`: default 1000 / 1000
    /// - `MENTOR_CATALOG_PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let service = parse_service(std::env::var("SERVICE").ok().as_deref())?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        let database = if service.needs_database() {
            let url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
            Some(DatabaseConfig {
                url,
                max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
                readiness: RetryPolicy {
                    max_attempts: env_parse("DB_CONNECT_ATTEMPTS", DEFAULT_DB_CONNECT_ATTEMPTS),
                    base_delay: Duration::from_millis(env_parse("DB_CONNECT_DELAY_MS", DEFAULT_DB_CONNECT_DELAY_MS)),
                    max_delay: Duration::from_millis(env_parse(
                        "DB_CONNECT_MAX_DELAY_MS",
                        DEFAULT_DB_CONNECT_MAX_DELAY_MS,
                    )),
                },
            })
        } else {
            None
        };

        let mentor_catalog_path = std::env::var("MENTOR_CATALOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { service, port, database, mentor_catalog_path })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
