//! SQLite persistence for breadth snapshots.
//!
//! Handlers and the collector depend on the [`BreadthStorage`] trait so
//! tests can substitute an in-memory mock; [`SqliteStorage`] is the real
//! implementation over a `sqlx` pool.

use crate::config::Config;
use breadth_business::BreadthSnapshot;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::future::Future;
use thiserror::Error;

/// How many snapshots the API surface returns.
pub const SNAPSHOT_LIMIT: i64 = 50;

/// Initialize a SQLite connection pool.
pub async fn create_pool(config: &Config) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .connect(config.database_url())
        .await?;

    tracing::info!("Database connection pool established");

    Ok(pool)
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

pub trait BreadthStorage: Clone + Send + Sync + 'static {
    fn is_connected(&self) -> impl Future<Output = bool> + Send;

    fn insert_snapshot(
        &self,
        snapshot: &BreadthSnapshot,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Most recent snapshots first, at most `limit` of them.
    fn latest_snapshots(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BreadthSnapshot>, StorageError>> + Send;
}

#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the breadth table when it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS breadth_data (
                index_name TEXT,
                multiplier INTEGER,
                timespan TEXT,
                declining INTEGER,
                unchanged INTEGER,
                advancing INTEGER,
                timestamp TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

type SnapshotRow = (String, i64, String, i64, i64, i64, String);

fn snapshot_from_row(row: SnapshotRow) -> BreadthSnapshot {
    let (index_name, multiplier, timespan, declining, unchanged, advancing, timestamp) = row;
    BreadthSnapshot {
        index_name,
        multiplier,
        timespan,
        declining,
        unchanged,
        advancing,
        timestamp,
    }
}

impl BreadthStorage for SqliteStorage {
    fn is_connected(&self) -> impl Future<Output = bool> + Send {
        let pool = self.pool.clone();
        async move { sqlx::query("SELECT 1").execute(&pool).await.is_ok() }
    }

    fn insert_snapshot(
        &self,
        snapshot: &BreadthSnapshot,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        let pool = self.pool.clone();
        let snapshot = snapshot.clone();
        async move {
            sqlx::query(
                "INSERT INTO breadth_data
                    (index_name, multiplier, timespan, declining, unchanged, advancing, timestamp)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&snapshot.index_name)
            .bind(snapshot.multiplier)
            .bind(&snapshot.timespan)
            .bind(snapshot.declining)
            .bind(snapshot.unchanged)
            .bind(snapshot.advancing)
            .bind(&snapshot.timestamp)
            .execute(&pool)
            .await?;
            Ok(())
        }
    }

    fn latest_snapshots(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BreadthSnapshot>, StorageError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows = sqlx::query_as::<_, SnapshotRow>(
                "SELECT index_name, multiplier, timespan, declining, unchanged, advancing, timestamp
                 FROM breadth_data
                 ORDER BY timestamp DESC
                 LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&pool)
            .await?;
            Ok(rows.into_iter().map(snapshot_from_row).collect())
        }
    }
}
