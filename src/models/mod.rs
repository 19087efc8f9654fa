//! Persistence for snippets.
//!
//! [`SnippetStore`] owns every query against the `snippets` table. It is
//! handed an open [`SqlitePool`] and never opens or closes one itself; that
//! is [`open_pool`]'s job, called once during bootstrap.

mod error;
mod schema;
mod snippets;

pub use error::{BoxedError, StoreError};
pub use schema::initialize_schema;
pub use snippets::{Snippet, SnippetStore, LATEST_LIMIT};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

/// Open a SQLite connection pool for `dsn`.
///
/// Accepts `sqlite://path/to/file.db`, `sqlite:path.db` and
/// `sqlite::memory:`. File databases are created when missing.
///
/// An in-memory database exists per connection, so for `:memory:` DSNs the
/// pool is pinned to a single connection that is never reaped.
///
/// # Errors
///
/// Returns `StoreError::Storage` if the DSN does not parse or the first
/// connection cannot be established.
pub async fn open_pool(dsn: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let in_memory = dsn.contains(":memory:");

    let options = SqliteConnectOptions::from_str(dsn)
        .map_err(|e| StoreError::storage("invalid SQLite DSN", e))?
        .create_if_missing(true)
        .foreign_keys(true);

    let options = if in_memory {
        options
    } else {
        options.journal_mode(SqliteJournalMode::Wal)
    };

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .idle_timeout(Duration::from_secs(600))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(|e| StoreError::storage("failed to create SQLite pool", e))?;

    debug!(in_memory, max_connections, "SQLite pool opened");
    Ok(pool)
}
