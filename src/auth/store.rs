/// Credential store
///
/// Admin users persisted in the `users` table. Emails are normalised
/// (trimmed, lower-cased) on every read and write so lookups are
/// case-insensitive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::role::Role;
use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// User as returned by the admin API; never carries the hash.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
    )
    .bind(normalize_email(email))
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Insert a user.
///
/// # Errors
/// A concurrent insert of the same email surfaces as
/// `DatabaseError::UniqueConstraintViolation` from the UNIQUE index.
pub async fn save(pool: &PgPool, new_user: NewUser) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING id, email, password_hash, role, created_at
        "#,
    )
    .bind(normalize_email(&new_user.email))
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, role, created_at FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(total)
}
