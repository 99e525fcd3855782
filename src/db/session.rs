//! A single live connection to the student database.

use super::migrations::{configure_pragmas_conn, run_migrations};
use crate::config::Config;
use crate::error::AppError;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use std::path::Path;
use tracing::info;

/// Owns the one connection used by a console session.
///
/// The pool is capped at a single connection, so statements are serialized
/// and a transaction holds the connection until it commits or rolls back.
#[derive(Debug, Clone)]
pub struct Session {
    pool: SqlitePool,
}

impl Session {
    /// Open the database named by `config`, creating the file and schema if needed.
    ///
    /// # Errors
    /// Returns `AppError::Connection` if the database cannot be opened or the
    /// schema cannot be applied.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let db_path = config.database_path.as_str();
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Connection(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let busy_timeout_ms = config.busy_timeout_ms;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .after_connect(move |conn, _meta| {
                Box::pin(async move { configure_pragmas_conn(conn, busy_timeout_ms).await })
            })
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| AppError::Connection(format!("{}: {}", db_path, e)))?;

        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Connection(format!("schema setup failed: {}", e)))?;

        info!("Connected to student database at {}", db_path);
        Ok(Session { pool })
    }

    /// The underlying pool, usable as a sqlx executor for reads.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction; writes become durable on `commit()`.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Release the connection.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Database connection closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
