//! Database Tests
//!
//! Append-only chat history behavior against an in-memory SQLite pool.

use crate::database::{add_entry, get_history, init_db};

#[tokio::test]
async fn test_init_creates_schema() {
    let pool = init_db(":memory:").await.unwrap();
    let history = get_history(&pool, "anon_nobody").await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_append_and_fetch_ordering() {
    let pool = init_db(":memory:").await.unwrap();

    add_entry(&pool, "anon_1", "user", "I feel anxious", false)
        .await
        .unwrap();
    add_entry(&pool, "anon_1", "bot", "I'm here to listen.", true)
        .await
        .unwrap();
    add_entry(&pool, "anon_1", "user", "thank you", false)
        .await
        .unwrap();

    let history = get_history(&pool, "anon_1").await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].sender, "user");
    assert_eq!(history[0].content, "I feel anxious");
    assert_eq!(history[1].sender, "bot");
    assert!(history[1].degraded);
    assert_eq!(history[2].content, "thank you");
}

#[tokio::test]
async fn test_history_is_isolated_per_identity() {
    let pool = init_db(":memory:").await.unwrap();

    add_entry(&pool, "anon_a", "user", "hello from a", false)
        .await
        .unwrap();
    add_entry(&pool, "anon_b", "user", "hello from b", false)
        .await
        .unwrap();

    let a = get_history(&pool, "anon_a").await.unwrap();
    let b = get_history(&pool, "anon_b").await.unwrap();

    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(a[0].content, "hello from a");
    assert_eq!(b[0].content, "hello from b");
}

#[tokio::test]
async fn test_degraded_flag_round_trip() {
    let pool = init_db(":memory:").await.unwrap();

    let stored = add_entry(&pool, "anon_c", "bot", "fallback text", true)
        .await
        .unwrap();
    assert!(stored.degraded);

    let fetched = get_history(&pool, "anon_c").await.unwrap();
    assert!(fetched[0].degraded);
}

#[tokio::test]
async fn test_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("saathi-test.sqlite");
    let pool = init_db(db_path.to_str().unwrap()).await.unwrap();

    add_entry(&pool, "anon_d", "user", "persisted", false)
        .await
        .unwrap();
    let history = get_history(&pool, "anon_d").await.unwrap();
    assert_eq!(history.len(), 1);
}
