//! User directory service: accounts and persisted mentor search.
//!
//! DESIGN
//! ======
//! Users live in the `users` table. Mentor attributes are stored only for
//! mentor profiles; `domains` and `badges` are kept comma-joined in storage
//! and parsed into `TagList` when a row is loaded.
//!
//! ERROR HANDLING
//! ==============
//! Signup runs inside one transaction: the duplicate-email check and the
//! insert either both commit or neither does. A unique violation from a
//! concurrent signup is reported as `EmailTaken`, same as the pre-check.
//! Login failures never say whether the email or the password was wrong.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use super::mentor_filter::{MentorAttributes, MentorFilter};
use super::password::{self, PasswordError};
use super::tags::TagList;

pub const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("corrupt user row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Mentee,
    Mentor,
}

impl ProfileType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mentee => "mentee",
            Self::Mentor => "mentor",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "mentee" => Some(Self::Mentee),
            "mentor" => Some(Self::Mentor),
            _ => None,
        }
    }
}

/// Signup payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub profile_type: ProfileType,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub domains: Option<TagList>,
    #[serde(default)]
    pub badges: Option<TagList>,
}

/// Mentor-only attributes. Absent values are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorDetails {
    pub seniority: String,
    pub domains: TagList,
    pub badges: TagList,
}

impl NewUser {
    /// Mentor attributes to store, or `None` for mentees (whatever they sent).
    #[must_use]
    pub fn mentor_details(&self) -> Option<MentorDetails> {
        match self.profile_type {
            ProfileType::Mentee => None,
            ProfileType::Mentor => Some(MentorDetails {
                seniority: self.seniority.as_deref().map(str::trim).unwrap_or_default().to_owned(),
                domains: self.domains.clone().unwrap_or_default(),
                badges: self.badges.clone().unwrap_or_default(),
            }),
        }
    }
}

/// A user as returned to clients. The credential hash never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub profile_type: ProfileType,
    pub seniority: Option<String>,
    pub domains: Option<TagList>,
    pub badges: Option<TagList>,
}

impl MentorAttributes for User {
    fn seniority(&self) -> Option<&str> {
        self.seniority.as_deref()
    }

    fn domains(&self) -> &TagList {
        static EMPTY: TagList = TagList::EMPTY;
        self.domains.as_ref().unwrap_or(&EMPTY)
    }

    fn badges(&self) -> &TagList {
        static EMPTY: TagList = TagList::EMPTY;
        self.badges.as_ref().unwrap_or(&EMPTY)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    hashed_password: String,
    profile_type: String,
    seniority: Option<String>,
    domains: Option<String>,
    badges: Option<String>,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserError> {
        let profile_type = ProfileType::parse(&self.profile_type).ok_or_else(|| UserError::CorruptRow {
            id: self.id,
            reason: format!("unknown profile_type '{}'", self.profile_type),
        })?;
        Ok(User {
            id: self.id,
            email: self.email,
            profile_type,
            seniority: self.seniority,
            domains: self.domains.as_deref().map(TagList::from_csv),
            badges: self.badges.as_deref().map(TagList::from_csv),
        })
    }
}

const USER_COLUMNS: &str = "id, email, hashed_password, profile_type, seniority, domains, badges";

// =============================================================================
// VALIDATION
// =============================================================================

/// Check the email has exactly one `@` with non-empty parts and no spaces.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

/// Validate a signup payload before touching storage.
///
/// # Errors
///
/// Returns `Validation` describing the first problem found.
pub fn validate_new_user(new_user: &NewUser) -> Result<(), UserError> {
    if !is_valid_email(&new_user.email) {
        return Err(UserError::Validation("email: value is not a valid email address".into()));
    }
    if new_user.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserError::Validation(format!(
            "password: must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Register a new user.
///
/// # Errors
///
/// Returns `Validation` for bad input, `EmailTaken` if the email exists, or a
/// storage/hashing error. Nothing is committed on error.
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, UserError> {
    validate_new_user(&new_user)?;
    let mentor = new_user.mentor_details();
    let hashed = password::hash_password_blocking(new_user.password.clone()).await?;

    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(&new_user.email)
        .fetch_one(tx.as_mut())
        .await?;
    if exists {
        warn!(email = %new_user.email, "email already registered");
        return Err(UserError::EmailTaken);
    }

    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (email, hashed_password, profile_type, seniority, domains, badges)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&new_user.email)
    .bind(&hashed)
    .bind(new_user.profile_type.as_str())
    .bind(mentor.as_ref().map(|m| m.seniority.as_str()))
    .bind(mentor.as_ref().map(|m| m.domains.to_csv()))
    .bind(mentor.as_ref().map(|m| m.badges.to_csv()))
    .fetch_one(tx.as_mut())
    .await
    .map_err(map_unique_violation)?;

    tx.commit().await.map_err(map_unique_violation)?;

    let user = row.into_user()?;
    info!(user_id = user.id, profile_type = user.profile_type.as_str(), "user created");
    Ok(user)
}

fn map_unique_violation(err: sqlx::Error) -> UserError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => UserError::EmailTaken,
        _ => UserError::Database(err),
    }
}

/// Check credentials and return the matching user.
///
/// # Errors
///
/// Returns `InvalidCredentials` for an unknown email or a wrong password.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<User, UserError> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        // Unknown emails pay one Argon2 verify too.
        password::verify_password_blocking(password.to_owned(), password::DUMMY_HASH.to_owned()).await?;
        warn!(%email, "login failed: unknown email");
        return Err(UserError::InvalidCredentials);
    };

    let verified = password::verify_password_blocking(password.to_owned(), row.hashed_password.clone()).await?;
    if !verified {
        warn!(%email, "login failed: wrong password");
        return Err(UserError::InvalidCredentials);
    }

    let user = row.into_user()?;
    info!(user_id = user.id, "login succeeded");
    Ok(user)
}

/// Mentor profiles matching `filter`, ordered by id.
///
/// Seniority is narrowed in SQL; domain and badge membership is checked on
/// the parsed tag lists.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn search_mentors(pool: &PgPool, filter: &MentorFilter) -> Result<Vec<User>, UserError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS}
         FROM users
         WHERE profile_type = 'mentor'
           AND ($1::text IS NULL OR seniority = $1)
         ORDER BY id ASC"
    ))
    .bind(filter.seniority.as_deref())
    .fetch_all(pool)
    .await?;

    let users = rows.into_iter().map(UserRow::into_user).collect::<Result<Vec<_>, _>>()?;
    Ok(filter.apply(users))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
