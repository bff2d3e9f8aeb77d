//! Chat-history persistence collaborator.
//!
//! The core never reads history to answer a message; this store is
//! append-only, keyed by identity, and consulted only by the history route.

use crate::models::ChatEntry;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    let db_url = if db_path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", db_path)
    };

    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chat_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identity TEXT NOT NULL,
            sender TEXT NOT NULL,
            content TEXT NOT NULL,
            degraded INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_chat_entries_identity ON chat_entries(identity);
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Chat history (append-only) ---

pub async fn add_entry(
    pool: &SqlitePool,
    identity: &str,
    sender: &str,
    content: &str,
    degraded: bool,
) -> Result<ChatEntry, sqlx::Error> {
    let created_at = Utc::now().timestamp();

    sqlx::query_as::<_, ChatEntry>(
        r#"
        INSERT INTO chat_entries (identity, sender, content, degraded, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, identity, sender, content, degraded, created_at
        "#,
    )
    .bind(identity)
    .bind(sender)
    .bind(content)
    .bind(degraded)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_history(
    pool: &SqlitePool,
    identity: &str,
) -> Result<Vec<ChatEntry>, sqlx::Error> {
    sqlx::query_as::<_, ChatEntry>(
        r#"
        SELECT id, identity, sender, content, degraded, created_at
        FROM chat_entries
        WHERE identity = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(identity)
    .fetch_all(pool)
    .await
}
