//! Repository trait and SQLx implementation for run history

use crate::persistence::error::PersistenceError;
use crate::persistence::models::{RunLogRow, RunRow};
use crate::persistence::pool::ConnectionPool;
use async_trait::async_trait;

/// Repository for run and run log operations
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Insert a run; fails on a duplicate id
    async fn add_run(&self, run: &RunRow) -> Result<(), PersistenceError>;

    /// Most recent runs first, at most `limit`
    async fn list_runs(&self, limit: i64) -> Result<Vec<RunRow>, PersistenceError>;

    async fn get_run(&self, run_id: &str) -> Result<Option<RunRow>, PersistenceError>;

    /// Runs of a session, oldest first
    async fn list_runs_by_session(&self, session_id: &str)
        -> Result<Vec<RunRow>, PersistenceError>;

    /// Delete a run and its logs; returns whether the run existed
    async fn delete_run(&self, run_id: &str) -> Result<bool, PersistenceError>;

    /// Insert a log line and return its new id
    async fn add_log(&self, log: &RunLogRow) -> Result<i64, PersistenceError>;

    /// Log lines of a run, oldest first
    async fn list_logs(&self, run_id: &str) -> Result<Vec<RunLogRow>, PersistenceError>;
}

fn map_insert_error(error: sqlx::Error, id: &str) -> PersistenceError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => PersistenceError::Duplicate {
            entity_type: "run".to_string(),
            id: id.to_string(),
        },
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => PersistenceError::NotFound {
            entity_type: "run".to_string(),
            identifier: id.to_string(),
        },
        _ => PersistenceError::Database(error),
    }
}

/// SQLx-based implementation of RunRepository
#[derive(Clone)]
pub struct SqlxRunRepository {
    pool: ConnectionPool,
}

impl SqlxRunRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RunRepository for SqlxRunRepository {
    async fn add_run(&self, run: &RunRow) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO runs (id, session_id, timestamp, agent, model, input, output, tools_used, exit_status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&run.id)
        .bind(&run.session_id)
        .bind(run.timestamp)
        .bind(&run.agent)
        .bind(&run.model)
        .bind(&run.input)
        .bind(&run.output)
        .bind(&run.tools_used)
        .bind(run.exit_status)
        .execute(self.pool.pool())
        .await
        .map_err(|e| map_insert_error(e, &run.id))?;

        tracing::debug!(run_id = %run.id, "Stored run");
        Ok(())
    }

    async fn list_runs(&self, limit: i64) -> Result<Vec<RunRow>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT id, session_id, timestamp, agent, model, input, output, tools_used, exit_status
             FROM runs ORDER BY timestamp DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool.pool())
        .await?;

        rows.iter()
            .map(|row| RunRow::from_row(row).map_err(PersistenceError::from))
            .collect()
    }

    async fn get_run(&self, run_id: &str) -> Result<Option<RunRow>, PersistenceError> {
        let row = sqlx::query(
            "SELECT id, session_id, timestamp, agent, model, input, output, tools_used, exit_status
             FROM runs WHERE id = ?",
        )
        .bind(run_id)
        .fetch_optional(self.pool.pool())
        .await?;

        row.as_ref()
            .map(RunRow::from_row)
            .transpose()
            .map_err(PersistenceError::from)
    }

    async fn list_runs_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<RunRow>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT id, session_id, timestamp, agent, model, input, output, tools_used, exit_status
             FROM runs WHERE session_id = ? ORDER BY timestamp ASC",
        )
        .bind(session_id)
        .fetch_all(self.pool.pool())
        .await?;

        rows.iter()
            .map(|row| RunRow::from_row(row).map_err(PersistenceError::from))
            .collect()
    }

    async fn delete_run(&self, run_id: &str) -> Result<bool, PersistenceError> {
        let mut tx = self.pool.pool().begin().await?;

        sqlx::query("DELETE FROM run_logs WHERE run_id = ?")
            .bind(run_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM runs WHERE id = ?")
            .bind(run_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let existed = result.rows_affected() > 0;
        tracing::debug!(run_id, existed, "Deleted run");
        Ok(existed)
    }

    async fn add_log(&self, log: &RunLogRow) -> Result<i64, PersistenceError> {
        let result = sqlx::query(
            "INSERT INTO run_logs (run_id, log_line, log_type, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(&log.run_id)
        .bind(&log.log_line)
        .bind(&log.log_type)
        .bind(log.timestamp)
        .execute(self.pool.pool())
        .await
        .map_err(|e| map_insert_error(e, &log.run_id))?;

        Ok(result.last_insert_rowid())
    }

    async fn list_logs(&self, run_id: &str) -> Result<Vec<RunLogRow>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT id, run_id, log_line, log_type, timestamp
             FROM run_logs WHERE run_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(run_id)
        .fetch_all(self.pool.pool())
        .await?;

        rows.iter()
            .map(|row| RunLogRow::from_row(row).map_err(PersistenceError::from))
            .collect()
    }
}
