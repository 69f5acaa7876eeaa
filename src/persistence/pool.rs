//! Database connection pool management

use crate::persistence::error::PersistenceError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Whether a SQLite URL points at a private in-memory database
pub fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn validate_url(url: &str) -> Result<(), PersistenceError> {
    if url.starts_with("sqlite:") {
        Ok(())
    } else {
        Err(PersistenceError::Connection(format!(
            "Unsupported database URL format. Expected sqlite:// or sqlite::memory:. Got: {}",
            url.split(':').next().unwrap_or("unknown")
        )))
    }
}

/// SQLite connection pool
#[derive(Clone)]
pub struct ConnectionPool {
    pool: SqlitePool,
}

impl ConnectionPool {
    /// Create a new connection pool from a database URL
    ///
    /// # Arguments
    ///
    /// * `url` - Database connection URL (`sqlite://path.db` or `sqlite::memory:`)
    /// * `max_connections` - Maximum number of connections in the pool
    /// * `connect_timeout_secs` - Connection timeout in seconds
    ///
    /// The database file is created if missing and foreign keys are enforced.
    /// An in-memory database lives only as long as its connection, so it gets
    /// a single connection that is never recycled.
    pub async fn new(
        url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, PersistenceError> {
        validate_url(url)?;

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| PersistenceError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = is_memory_url(url);
        let max_connections = if in_memory { 1 } else { max_connections };

        tracing::info!(
            "Connecting to SQLite database with max {} connections",
            max_connections
        );

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs));
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        tracing::info!("Successfully connected to SQLite database");

        Ok(Self { pool })
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), PersistenceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::Connection(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
