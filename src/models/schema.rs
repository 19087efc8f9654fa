//! Table definitions for the `snippets` relation.
//!
//! `created` and `expires` are stored as microseconds since the Unix epoch,
//! so the visibility filter is an integer comparison.

use sqlx::SqlitePool;

use super::StoreError;

/// Create the `snippets` table and its expiry index.
///
/// Safe to call on every start (uses IF NOT EXISTS).
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created INTEGER NOT NULL,
            expires INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::storage("failed to create snippets table", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_snippets_expires ON snippets(expires)")
        .execute(pool)
        .await
        .map_err(|e| StoreError::storage("failed to create expiry index", e))?;

    Ok(())
}
