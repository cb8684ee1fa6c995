// recording store - the sqlite database the capture subsystem writes

use crate::Error;
use serde::Serialize;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub struct Store {
    pool: SqlitePool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recording {
    pub id: i64,
    pub timestamp: f64,
    pub task: String,
}

impl Store {
    /// Open (or create) the recordings database at `path`.
    pub async fn open(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS recording (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp REAL NOT NULL,
                task_description TEXT NOT NULL DEFAULT ''
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<Recording>, Error> {
        let rows = sqlx::query(
            "SELECT id, timestamp, task_description FROM recording ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Recording {
                id: row.get(0),
                timestamp: row.get(1),
                task: row.get(2),
            })
            .collect())
    }

    pub async fn latest(&self) -> Result<Option<Recording>, Error> {
        let row = sqlx::query(
            "SELECT id, timestamp, task_description FROM recording \
             ORDER BY timestamp DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Recording {
            id: row.get(0),
            timestamp: row.get(1),
            task: row.get(2),
        }))
    }

    /// Delete all recorded data. Returns how many rows went away.
    pub async fn clear(&self) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM recording")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
