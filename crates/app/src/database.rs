//! Database connection management

use sqlx::{PgPool, query};
use thiserror::Error;

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

/// Failure surfaced by a backing store.
///
/// The in-memory stores never produce one; the PostgreSQL stores wrap the
/// underlying driver error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the catalog schema, creating any missing tables and indexes.
///
/// Statements are idempotent (`IF NOT EXISTS`), so this is safe to run on
/// every startup.
///
/// # Errors
///
/// Returns an error when a schema statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_SQL.split(';').map(str::trim) {
        if statement.is_empty() {
            continue;
        }

        query(statement).execute(pool).await?;
    }

    Ok(())
}
