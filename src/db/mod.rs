//! Database module for SQLite persistence.
//!
//! The [`Database`] handle is created once at startup and handed to every
//! registry; nothing in the crate reaches for a global connection.

use std::str::FromStr;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Shared handle to the record store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the connection pool for `url` and create the schema if needed.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30));

        // Ensure the parent directory exists
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the store is reachable.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections; waits for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parties (
                id TEXT PRIMARY KEY,
                party_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone_number TEXT NOT NULL,
                party_id TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sub_parties (
                id TEXT PRIMARY KEY,
                party_name TEXT NOT NULL,
                farm TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                parent_party_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vendors (
                id TEXT PRIMARY KEY,
                vendor_name TEXT NOT NULL,
                farm TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                party_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS party_vendor_entries (
                id TEXT PRIMARY KEY,
                party_id TEXT NOT NULL,
                sub_party_id TEXT NOT NULL,
                vendor_id TEXT NOT NULL,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                quantity REAL NOT NULL,
                price REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Indexes for the list-by-owner queries
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_sub_parties_parent ON sub_parties(parent_party_id);
            CREATE INDEX IF NOT EXISTS idx_vendors_party ON vendors(party_id);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Generate a new record identifier.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time in the format stored for `createdAt` / `updatedAt`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
