//! SnippetStore tests against an in-memory SQLite database.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test snippet_store
//! ```

use chrono::{TimeDelta, Utc};
use snippetbox::models::{self, SnippetStore, StoreError, LATEST_LIMIT};
use sqlx::SqlitePool;

/// Create an initialized in-memory pool and a store over it
async fn create_store() -> (SnippetStore, SqlitePool) {
    let pool = models::open_pool("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory SQLite pool");
    models::initialize_schema(&pool)
        .await
        .expect("failed to initialize schema");
    (SnippetStore::new(pool.clone()), pool)
}

/// Insert a row directly, bypassing the store's timestamp computation
async fn insert_fixture(pool: &SqlitePool, title: &str, created: i64, expires: i64) -> i64 {
    sqlx::query("INSERT INTO snippets (title, content, created, expires) VALUES (?1, ?2, ?3, ?4)")
        .bind(title)
        .bind("fixture content")
        .bind(created)
        .bind(expires)
        .execute(pool)
        .await
        .expect("fixture insert")
        .last_insert_rowid()
}

// ============================================================================
// Insert / Get
// ============================================================================

#[tokio::test]
async fn insert_then_get_returns_snippet() {
    let (store, _pool) = create_store().await;

    let before = Utc::now();
    let id = store
        .insert("O snail", "Climb Mount Fuji,\nBut slowly, slowly!", 7)
        .await
        .unwrap();
    assert!(id > 0);

    let snippet = store.get(id).await.unwrap();
    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "O snail");
    assert_eq!(snippet.content, "Climb Mount Fuji,\nBut slowly, slowly!");
    assert!(snippet.created >= before - TimeDelta::seconds(1));

    let lifetime = snippet.expires - snippet.created;
    let drift_ms = (lifetime - TimeDelta::days(7)).num_milliseconds().abs();
    assert!(drift_ms < 1000, "lifetime was {lifetime}");
}

#[tokio::test]
async fn ids_are_assigned_in_increasing_order() {
    let (store, _pool) = create_store().await;
    let first = store.insert("a", "a", 1).await.unwrap();
    let second = store.insert("b", "b", 1).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let (store, _pool) = create_store().await;
    store.insert("present", "x", 7).await.unwrap();

    for id in [0, -1, 999_999] {
        match store.get(id).await {
            Err(StoreError::NotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("expected NotFound for {id}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn get_expired_is_not_found() {
    let (store, pool) = create_store().await;
    let id = store.insert("gone", "expired yesterday", -1).await.unwrap();

    let err = store.get(id).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");

    // expired rows are filtered, never deleted
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snippets WHERE id = ?1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn get_at_exact_expiry_is_not_found() {
    let (store, pool) = create_store().await;
    let now = Utc::now().timestamp_micros();
    let id = insert_fixture(&pool, "zero lifetime", now, now).await;

    assert!(store.get(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn get_shortly_before_expiry_is_visible() {
    let (store, pool) = create_store().await;
    let now = Utc::now();
    let expires = (now + TimeDelta::minutes(1)).timestamp_micros();
    let id = insert_fixture(&pool, "almost gone", now.timestamp_micros(), expires).await;

    assert_eq!(store.get(id).await.unwrap().title, "almost gone");
    let ids: Vec<i64> = store.latest().await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, [id]);
}

#[tokio::test]
async fn insert_with_unrepresentable_expiry_fails() {
    let (store, _pool) = create_store().await;
    let err = store.insert("far", "future", i64::MAX).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }), "got {err:?}");
}

// ============================================================================
// Latest
// ============================================================================

#[tokio::test]
async fn latest_returns_newest_first() {
    let (store, _pool) = create_store().await;

    let a = store.insert("A", "first", 7).await.unwrap();
    let b = store.insert("B", "second", 7).await.unwrap();
    let c = store.insert("C", "third", 7).await.unwrap();

    let latest = store.latest().await.unwrap();
    let ids: Vec<i64> = latest.iter().map(|s| s.id).collect();
    assert_eq!(ids, [c, b, a]);

    let snippet = store.get(b).await.unwrap();
    assert_eq!(snippet.title, "B");
    assert_eq!(snippet.content, "second");

    assert!(store.get(999_999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn latest_is_capped_and_sorted() {
    let (store, _pool) = create_store().await;

    let mut last = 0;
    for i in 0..(LATEST_LIMIT + 3) {
        last = store.insert(&format!("snippet {i}"), "body", 1).await.unwrap();
    }

    let latest = store.latest().await.unwrap();
    assert_eq!(latest.len() as i64, LATEST_LIMIT);
    assert_eq!(latest[0].id, last);
    assert!(latest.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn latest_excludes_expired_even_when_newest() {
    let (store, _pool) = create_store().await;

    let live = store.insert("live", "x", 7).await.unwrap();
    let expired = store.insert("expired", "x", -1).await.unwrap();
    assert!(expired > live);

    let latest = store.latest().await.unwrap();
    let ids: Vec<i64> = latest.iter().map(|s| s.id).collect();
    assert_eq!(ids, [live]);
}

#[tokio::test]
async fn latest_on_empty_table_is_empty() {
    let (store, _pool) = create_store().await;
    assert!(store.latest().await.unwrap().is_empty());
}

#[tokio::test]
async fn latest_fails_instead_of_truncating_on_bad_row() {
    let (store, pool) = create_store().await;

    store.insert("good", "x", 7).await.unwrap();
    let future = (Utc::now() + TimeDelta::days(7)).timestamp_micros();
    let bad = insert_fixture(&pool, "bad", i64::MAX, future).await;
    store.insert("also good", "x", 7).await.unwrap();

    let err = store.latest().await.unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }), "got {err:?}");

    let err = store.get(bad).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }), "got {err:?}");
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn closed_pool_surfaces_storage_errors() {
    let (store, pool) = create_store().await;
    let id = store.insert("before close", "x", 7).await.unwrap();
    pool.close().await;

    let storage = |r: &StoreError| matches!(r, StoreError::Storage { .. });

    assert!(storage(&store.insert("t", "c", 1).await.unwrap_err()));
    assert!(storage(&store.get(id).await.unwrap_err()));
    assert!(storage(&store.latest().await.unwrap_err()));
    assert!(storage(&store.ping().await.unwrap_err()));
}

#[tokio::test]
async fn missing_table_is_storage_error_not_not_found() {
    let pool = models::open_pool("sqlite::memory:", 1).await.unwrap();
    let store = SnippetStore::new(pool);

    let err = store.get(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }), "got {err:?}");
}

#[tokio::test]
async fn schema_initialization_is_idempotent() {
    let (store, pool) = create_store().await;
    let id = store.insert("kept", "x", 7).await.unwrap();

    models::initialize_schema(&pool).await.unwrap();
    assert_eq!(store.get(id).await.unwrap().title, "kept");
    store.ping().await.unwrap();
}
