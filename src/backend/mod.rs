//! In-process backend
//!
//! [`SqliteBackend`] answers the run commands of [`crate::bridge::commands`]
//! from the run database, exchanging the same JSON a native backend would.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::bridge::{commands, Bridge};
use crate::persistence::{DataStore, RunLogRow, RunRepository, RunRow};

#[derive(Deserialize)]
struct LimitArgs {
    limit: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunIdArgs {
    run_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionArgs {
    session_id: String,
}

#[derive(Deserialize)]
struct AddRunArgs {
    run: RunRow,
}

#[derive(Deserialize)]
struct AddLogArgs {
    log: RunLogRow,
}

fn parse_args<T: DeserializeOwned>(command: &str, args: Value) -> anyhow::Result<T> {
    serde_json::from_value(args).with_context(|| format!("Invalid arguments for '{}'", command))
}

/// [`Bridge`] backed by a run repository
#[derive(Clone)]
pub struct SqliteBackend {
    runs: Arc<dyn RunRepository>,
}

impl SqliteBackend {
    pub fn new(runs: Arc<dyn RunRepository>) -> Self {
        Self { runs }
    }

    pub fn from_store(store: &DataStore) -> Self {
        Self::new(store.runs().clone())
    }
}

#[async_trait]
impl Bridge for SqliteBackend {
    async fn invoke(&self, command: &str, args: Value) -> anyhow::Result<Value> {
        debug!(command, "Dispatching backend command");

        match command {
            commands::GET_RUNS => {
                let LimitArgs { limit } = parse_args(command, args)?;
                let runs = self.runs.list_runs(limit).await?;
                Ok(serde_json::to_value(runs)?)
            }
            commands::GET_RUN_BY_ID => {
                let RunIdArgs { run_id } = parse_args(command, args)?;
                let run = self.runs.get_run(&run_id).await?;
                Ok(serde_json::to_value(run)?)
            }
            commands::GET_RUNS_BY_SESSION => {
                let SessionArgs { session_id } = parse_args(command, args)?;
                let runs = self.runs.list_runs_by_session(&session_id).await?;
                Ok(serde_json::to_value(runs)?)
            }
            commands::ADD_RUN => {
                let AddRunArgs { run } = parse_args(command, args)?;
                self.runs.add_run(&run).await?;
                Ok(Value::Null)
            }
            commands::DELETE_RUN => {
                let RunIdArgs { run_id } = parse_args(command, args)?;
                self.runs.delete_run(&run_id).await?;
                Ok(Value::Null)
            }
            commands::GET_RUN_LOGS => {
                let RunIdArgs { run_id } = parse_args(command, args)?;
                let logs = self.runs.list_logs(&run_id).await?;
                Ok(serde_json::to_value(logs)?)
            }
            commands::ADD_RUN_LOG => {
                let AddLogArgs { log } = parse_args(command, args)?;
                let id = self.runs.add_log(&log).await?;
                Ok(json!(id))
            }
            other => Err(anyhow!("Unknown command: {}", other)),
        }
    }
}
