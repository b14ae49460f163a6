//! User database queries.

use crate::models::{new_id, NewUser, User};
use crate::{Error, Result};

use super::{parse_id, DbPool};

/// Insert a user and return the generated id.
///
/// The UNIQUE constraint on `email` makes this the authoritative duplicate
/// check: a violation is reported as `EmailTaken` even when a concurrent signup
/// slipped past the service-level lookup.
pub async fn insert_user(pool: &DbPool, input: NewUser) -> Result<String> {
    let id = new_id();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, name, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.email)
    .bind(&input.password_hash)
    .bind(&input.name)
    .bind(input.created_at)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => Error::EmailTaken,
        _ => Error::Database(e),
    })?;

    Ok(id)
}

/// Get a user by ID.
pub async fn get_user(pool: &DbPool, id: &str) -> Result<Option<User>> {
    let id = parse_id(id, "user")?;

    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(Error::Database)
}

/// Get a user by email. Matching is exact (case-sensitive).
pub async fn get_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(Error::Database)
}
