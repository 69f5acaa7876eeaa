//! Database models for the run database
//!
//! Rows keep the backend's snake_case shape, `tools_used` included as a raw
//! JSON string, so they serialize straight onto the bridge.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Run stored in the `runs` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRow {
    pub id: String,
    pub session_id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub agent: String,
    pub model: String,
    pub input: String,
    pub output: String,
    /// JSON text, stored as given
    pub tools_used: String,
    pub exit_status: i32,
}

impl RunRow {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let output: Option<String> = row.try_get("output")?;
        let tools_used: Option<String> = row.try_get("tools_used")?;
        let exit_status: Option<i64> = row.try_get("exit_status")?;
        let exit_status = i32::try_from(exit_status.unwrap_or(0))
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            timestamp: row.try_get("timestamp")?,
            agent: row.try_get("agent")?,
            model: row.try_get("model")?,
            input: row.try_get("input")?,
            output: output.unwrap_or_default(),
            tools_used: tools_used.unwrap_or_else(|| "[]".to_string()),
            exit_status,
        })
    }
}

/// Log line stored in the `run_logs` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogRow {
    /// Ignored on insert; assigned by the database
    pub id: i64,
    pub run_id: String,
    pub log_line: String,
    pub log_type: String,
    pub timestamp: i64,
}

impl RunLogRow {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            run_id: row.try_get("run_id")?,
            log_line: row.try_get("log_line")?,
            log_type: row.try_get("log_type")?,
            timestamp: row.try_get("timestamp")?,
        })
    }
}
