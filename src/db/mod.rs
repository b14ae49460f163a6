//! Database layer for notevault.
//!
//! Provides SQLite connection pooling, the query modules for each collection,
//! and the [`Store`] gateway the services are written against.

mod notes;
mod pool;
mod shared_links;
mod store;
mod users;

pub use notes::*;
pub use pool::*;
pub use shared_links::*;
pub use store::*;
pub use users::*;

use crate::{Error, Result};
use tracing::info;
use uuid::Uuid;

/// Type alias for the SQLite connection pool.
pub type DbPool = sqlx::SqlitePool;

/// Initialize the database connection pool.
///
/// Creates parent directories if needed. `:memory:` databases get a
/// single-connection pool.
pub async fn init_pool(path: &str) -> Result<DbPool> {
    let pool = create_pool_with_config(path, PoolConfig::for_path(path)).await?;

    info!("Database pool initialized: {}", path);

    Ok(pool)
}

/// Initialize the database schema.
///
/// Applies the complete schema from schema.sql. Uses IF NOT EXISTS
/// clauses so it's safe to run multiple times.
pub async fn initialize_schema(pool: &DbPool) -> Result<()> {
    let schema = include_str!("../../schema.sql");

    info!("Initializing database schema");

    for statement in schema_statements(schema) {
        sqlx::query(&statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully");

    Ok(())
}

/// Split a schema script into executable statements.
///
/// Comment lines are removed before splitting so a `;` inside a comment never
/// ends a statement.
fn schema_statements(schema: &str) -> Vec<String> {
    let sql: String = schema
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check identifier syntax at the store boundary.
///
/// `kind` names the identifier in the error message ("note", "user", ...).
pub fn parse_id(id: &str, kind: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::Validation(format!("Invalid {} ID", kind)))
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = init_pool(":memory:").await.unwrap();
    initialize_schema(&pool).await.unwrap();
    pool
}

#[cfg(test)]
pub(crate) async fn seed_user(store: &dyn Store, email: &str) -> String {
    store
        .insert_user(crate::models::NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test".to_string(),
            created_at: chrono::Utc::now(),
        })
        .await
        .unwrap()
}
