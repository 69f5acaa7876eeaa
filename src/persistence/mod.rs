//! Run database
//!
//! SQLite storage for run history and run logs, the data behind the backend
//! commands in [`crate::backend`].
//!
//! # Architecture
//!
//! - `DataStore`: Main entry point for database operations
//! - `RunRepository`: runs and their log lines
//! - `MigrationRunner`: Database schema migrations
//!
//! # Example
//!
//! ```rust,no_run
//! use ocgui::persistence::{DataStore, PersistenceConfig, RunRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PersistenceConfig {
//!         url: "sqlite://ocgui.db".to_string(),
//!         max_connections: 5,
//!         auto_migrate: true,
//!     };
//!
//!     let data_store = DataStore::new(&config).await?;
//!     let recent = data_store.runs().list_runs(10).await?;
//!     println!("{} runs", recent.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::PersistenceError;
pub use migrations::{MigrationResult, MigrationRunner, MigrationStatus};
pub use models::{RunLogRow, RunRow};
pub use pool::ConnectionPool;
pub use repository::{RunRepository, SqlxRunRepository};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the persistence layer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersistenceConfig {
    /// Database connection URL
    /// - SQLite file: `sqlite://ocgui.db`
    /// - In memory: `sqlite::memory:`
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Run migrations when the store is opened
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_auto_migrate() -> bool {
    true
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: default_max_connections(),
            auto_migrate: default_auto_migrate(),
        }
    }
}

/// Main data store providing access to all persistence operations
#[derive(Clone)]
pub struct DataStore {
    pool: ConnectionPool,
    config: PersistenceConfig,
    runs: Arc<SqlxRunRepository>,
}

impl DataStore {
    /// Open the database, migrating it when `auto_migrate` is set
    pub async fn new(config: &PersistenceConfig) -> Result<Self, PersistenceError> {
        let pool =
            ConnectionPool::new(&config.url, config.max_connections, CONNECT_TIMEOUT_SECS).await?;

        let store = Self {
            runs: Arc::new(SqlxRunRepository::new(pool.clone())),
            pool,
            config: config.clone(),
        };

        if config.auto_migrate {
            let result = store.migrate().await?;
            tracing::info!(
                applied = result.applied,
                skipped = result.skipped,
                "Run database ready"
            );
        }

        Ok(store)
    }

    /// Get the run repository
    pub fn runs(&self) -> &Arc<SqlxRunRepository> {
        &self.runs
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<MigrationResult, PersistenceError> {
        MigrationRunner::new(self.pool.clone()).migrate_up().await
    }

    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>, PersistenceError> {
        MigrationRunner::new(self.pool.clone()).status().await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<(), PersistenceError> {
        self.pool.health_check().await
    }

    /// Close the database connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: &str, session: &str, timestamp: i64) -> RunRow {
        RunRow {
            id: id.to_string(),
            session_id: session.to_string(),
            timestamp,
            agent: "reviewer".to_string(),
            model: "gpt-4".to_string(),
            input: "in".to_string(),
            output: "out".to_string(),
            tools_used: r#"["read"]"#.to_string(),
            exit_status: 0,
        }
    }

    fn log(run_id: &str, line: &str, timestamp: i64) -> RunLogRow {
        RunLogRow {
            id: 999,
            run_id: run_id.to_string(),
            log_line: line.to_string(),
            log_type: "info".to_string(),
            timestamp,
        }
    }

    async fn store() -> DataStore {
        DataStore::new(&PersistenceConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_orders_and_limits() {
        let store = store().await;
        let runs = store.runs();
        runs.add_run(&run("a", "s1", 100)).await.unwrap();
        runs.add_run(&run("b", "s1", 300)).await.unwrap();
        runs.add_run(&run("c", "s2", 200)).await.unwrap();

        let recent: Vec<String> = runs
            .list_runs(2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(recent, vec!["b", "c"]);

        let session: Vec<String> = runs
            .list_runs_by_session("s1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(session, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_get_run_round_trip() {
        let store = store().await;
        store.runs().add_run(&run("a", "s1", 1)).await.unwrap();

        let fetched = store.runs().get_run("a").await.unwrap().unwrap();
        assert_eq!(fetched, run("a", "s1", 1));
        assert!(store.runs().get_run("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_exit_status_is_an_error() {
        let store = store().await;
        for (id, status) in [("neg", -1i64), ("big", 4_294_967_296)] {
            sqlx::query(
                "INSERT INTO runs (id, session_id, timestamp, agent, model, input, output, tools_used, exit_status) \
                 VALUES (?, 's1', 1, 'a', 'm', 'i', 'o', '[]', ?)",
            )
            .bind(id)
            .bind(status)
            .execute(store.pool().pool())
            .await
            .unwrap();
        }

        let neg = store.runs().get_run("neg").await.unwrap().unwrap();
        assert_eq!(neg.exit_status, -1);
        assert!(store.runs().get_run("big").await.is_err());
        assert!(store.runs().list_runs(10).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_run_is_rejected() {
        let store = store().await;
        store.runs().add_run(&run("a", "s1", 1)).await.unwrap();
        let err = store.runs().add_run(&run("a", "s1", 2)).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_logs_get_new_ids_and_are_deleted_with_run() {
        let store = store().await;
        let runs = store.runs();
        runs.add_run(&run("a", "s1", 1)).await.unwrap();

        let first = runs.add_log(&log("a", "second", 20)).await.unwrap();
        let second = runs.add_log(&log("a", "first", 10)).await.unwrap();
        assert_ne!(first, 999);
        assert!(second > first);

        let lines: Vec<String> = runs
            .list_logs("a")
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.log_line)
            .collect();
        assert_eq!(lines, vec!["first", "second"]);

        assert!(runs.delete_run("a").await.unwrap());
        assert!(runs.list_logs("a").await.unwrap().is_empty());
        assert!(!runs.delete_run("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_log_for_unknown_run_is_rejected() {
        let store = store().await;
        let err = store.runs().add_log(&log("ghost", "x", 1)).await.unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }
}
