//! Run history over the bridge
//!
//! The backend speaks snake_case records and stores `tools_used` as a JSON
//! string. This module converts between that wire shape and [`Run`] /
//! [`RunLog`]. A `tools_used` value that is not a JSON array of strings is
//! read as an empty list rather than an error.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::{commands, invoke, Bridge};
use crate::constants::runs::DEFAULT_LIMIT;
use crate::domain::{LogType, NewRunLog, Run, RunId, RunLog};
use crate::error::AppResult;

/// Run as the backend sends and stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRun {
    pub id: String,
    pub session_id: String,
    pub timestamp: i64,
    pub agent: String,
    pub model: String,
    pub input: String,
    pub output: String,
    /// JSON-encoded list of tool names
    pub tools_used: String,
    pub exit_status: i32,
}

/// Run log as the backend sends and stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRunLog {
    pub id: i64,
    pub run_id: String,
    pub log_line: String,
    pub log_type: String,
    pub timestamp: i64,
}

fn parse_tools_used(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!(error = %e, "tools_used is not a JSON string array, using empty list");
        Vec::new()
    })
}

fn parse_log_type(raw: &str) -> LogType {
    raw.parse().unwrap_or_else(|e: String| {
        debug!(error = %e, "Unrecognized log type, treating as info");
        LogType::Info
    })
}

impl From<WireRun> for Run {
    fn from(wire: WireRun) -> Self {
        let tools_used = parse_tools_used(&wire.tools_used);
        Run {
            id: RunId::from(wire.id),
            session_id: wire.session_id,
            timestamp: wire.timestamp,
            agent: wire.agent,
            model: wire.model,
            input: wire.input,
            output: wire.output,
            tools_used,
            exit_status: wire.exit_status,
        }
    }
}

impl From<&Run> for WireRun {
    fn from(run: &Run) -> Self {
        WireRun {
            id: run.id.to_string(),
            session_id: run.session_id.clone(),
            timestamp: run.timestamp,
            agent: run.agent.clone(),
            model: run.model.clone(),
            input: run.input.clone(),
            output: run.output.clone(),
            // Vec<String> always serializes; compact form, no spaces
            tools_used: serde_json::to_string(&run.tools_used).unwrap_or_else(|_| "[]".to_string()),
            exit_status: run.exit_status,
        }
    }
}

impl From<WireRunLog> for RunLog {
    fn from(wire: WireRunLog) -> Self {
        RunLog {
            id: wire.id,
            run_id: RunId::from(wire.run_id),
            log_type: parse_log_type(&wire.log_type),
            log_line: wire.log_line,
            timestamp: wire.timestamp,
        }
    }
}

impl From<&NewRunLog> for WireRunLog {
    fn from(log: &NewRunLog) -> Self {
        WireRunLog {
            id: 0,
            run_id: log.run_id.to_string(),
            log_line: log.log_line.clone(),
            log_type: log.log_type.as_str().to_string(),
            timestamp: log.timestamp,
        }
    }
}

/// Typed run operations over a [`Bridge`]
#[derive(Clone)]
pub struct RunsApi {
    bridge: Arc<dyn Bridge>,
    default_limit: u32,
}

impl RunsApi {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self {
            bridge,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Use `limit` when `get_all` is called without one
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Most recent runs, `limit` defaulting to 100
    pub async fn get_all(&self, limit: Option<u32>) -> AppResult<Vec<Run>> {
        let limit = limit.unwrap_or(self.default_limit);
        let runs: Vec<WireRun> =
            invoke(self.bridge.as_ref(), commands::GET_RUNS, json!({ "limit": limit })).await?;
        Ok(runs.into_iter().map(Run::from).collect())
    }

    pub async fn get_by_id(&self, run_id: &RunId) -> AppResult<Option<Run>> {
        let run: Option<WireRun> = invoke(
            self.bridge.as_ref(),
            commands::GET_RUN_BY_ID,
            json!({ "runId": run_id }),
        )
        .await?;
        Ok(run.map(Run::from))
    }

    pub async fn get_by_session(&self, session_id: &str) -> AppResult<Vec<Run>> {
        let runs: Vec<WireRun> = invoke(
            self.bridge.as_ref(),
            commands::GET_RUNS_BY_SESSION,
            json!({ "sessionId": session_id }),
        )
        .await?;
        Ok(runs.into_iter().map(Run::from).collect())
    }

    /// Store a run; the backend reply is discarded
    pub async fn add(&self, run: &Run) -> AppResult<()> {
        let _: Value = invoke(
            self.bridge.as_ref(),
            commands::ADD_RUN,
            json!({ "run": WireRun::from(run) }),
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, run_id: &RunId) -> AppResult<()> {
        let _: Value = invoke(
            self.bridge.as_ref(),
            commands::DELETE_RUN,
            json!({ "runId": run_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn get_logs(&self, run_id: &RunId) -> AppResult<Vec<RunLog>> {
        let logs: Vec<WireRunLog> = invoke(
            self.bridge.as_ref(),
            commands::GET_RUN_LOGS,
            json!({ "runId": run_id }),
        )
        .await?;
        Ok(logs.into_iter().map(RunLog::from).collect())
    }

    /// Store a log line and return the id the backend assigned
    pub async fn add_log(&self, log: &NewRunLog) -> AppResult<i64> {
        invoke(
            self.bridge.as_ref(),
            commands::ADD_RUN_LOG,
            json!({ "log": WireRunLog::from(log) }),
        )
        .await
    }
}
