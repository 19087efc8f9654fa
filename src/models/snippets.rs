//! The snippet store: insert, point lookup, and the latest-ten listing.
//!
//! Visibility is a read-time filter (`expires > now`). Expired rows are never
//! deleted here.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::StoreError;

/// Maximum number of snippets returned by [`SnippetStore::latest`].
pub const LATEST_LIMIT: i64 = 10;

/// A titled text entry with a creation time and an expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.content)?;
        writeln!(f)?;
        write!(
            f,
            "created {}  expires {}",
            self.created.format("%d %b %Y at %H:%M"),
            self.expires.format("%d %b %Y at %H:%M"),
        )
    }
}

/// Persistence access for the `snippets` table.
///
/// Holds no state besides the injected pool. Cloning is cheap and shares the
/// same pool.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    pool: SqlitePool,
}

impl SnippetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a snippet expiring `expires_in_days` days from now.
    ///
    /// Returns the id assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the expiry overflows the timestamp
    /// range or the insert fails.
    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_in_days: i64,
    ) -> Result<i64, StoreError> {
        let created = Utc::now();
        let expires = TimeDelta::try_days(expires_in_days)
            .and_then(|delta| created.checked_add_signed(delta))
            .ok_or_else(|| {
                StoreError::invalid_data(format!(
                    "expiry of {expires_in_days} days is out of range"
                ))
            })?;

        let result = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(created.timestamp_micros())
        .bind(expires.timestamp_micros())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::storage("insert snippet failed", e))?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch one visible snippet by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no row matches or the row has expired.
    /// Returns `StoreError::Storage` for any other failure.
    pub async fn get(&self, id: i64) -> Result<Snippet, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > ?1 AND id = ?2
            "#,
        )
        .bind(Utc::now().timestamp_micros())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::storage("get snippet failed", e))?
        .ok_or(StoreError::NotFound { id })?;

        snippet_from_row(&row)
    }

    /// The most recent visible snippets, newest (highest id) first.
    ///
    /// Returns at most [`LATEST_LIMIT`] entries. The whole result set is read
    /// before returning; a row that fails to decode fails the call instead of
    /// truncating the list.
    pub async fn latest(&self) -> Result<Vec<Snippet>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )
        .bind(Utc::now().timestamp_micros())
        .bind(LATEST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::storage("list latest snippets failed", e))?;

        rows.iter().map(snippet_from_row).collect()
    }

    /// Round-trip a trivial query to check the pool is usable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("ping failed", e))?;
        Ok(())
    }
}

fn snippet_from_row(row: &SqliteRow) -> Result<Snippet, StoreError> {
    let decode = |column: &'static str| {
        move |e: sqlx::Error| StoreError::storage(format!("failed to decode column {column}"), e)
    };

    let created: i64 = row.try_get("created").map_err(decode("created"))?;
    let expires: i64 = row.try_get("expires").map_err(decode("expires"))?;

    Ok(Snippet {
        id: row.try_get("id").map_err(decode("id"))?,
        title: row.try_get("title").map_err(decode("title"))?,
        content: row.try_get("content").map_err(decode("content"))?,
        created: timestamp_from_micros("created", created)?,
        expires: timestamp_from_micros("expires", expires)?,
    })
}

fn timestamp_from_micros(column: &str, micros: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        StoreError::invalid_data(format!("invalid {column} timestamp: {micros}"))
    })
}
