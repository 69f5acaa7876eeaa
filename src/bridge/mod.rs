//! Backend bridge
//!
//! A [`Bridge`] carries a named command with JSON arguments to the native
//! backend and returns its JSON reply. [`invoke`] is the typed entry point:
//! any failure, including a reply of the wrong shape, comes back as an
//! [`AppError`] with [`ErrorCode::Invoke`] unless the bridge already raised
//! an `AppError` of its own.

pub mod runs;

pub use runs::{RunsApi, WireRun, WireRunLog};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, AppResult, ErrorCode};

/// Command names understood by the backend
pub mod commands {
    pub const GET_RUNS: &str = "get_runs";
    pub const GET_RUN_BY_ID: &str = "get_run_by_id";
    pub const GET_RUNS_BY_SESSION: &str = "get_runs_by_session";
    pub const ADD_RUN: &str = "add_run";
    pub const DELETE_RUN: &str = "delete_run";
    pub const GET_RUN_LOGS: &str = "get_run_logs";
    pub const ADD_RUN_LOG: &str = "add_run_log";
}

/// Request/response channel to the native backend
#[async_trait]
pub trait Bridge: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> anyhow::Result<Value>;
}

/// Call `command` and decode the reply as `T`
pub async fn invoke<T, B>(bridge: &B, command: &str, args: Value) -> AppResult<T>
where
    T: DeserializeOwned,
    B: Bridge + ?Sized,
{
    debug!(command, "Invoking backend command");
    let reply = bridge
        .invoke(command, args)
        .await
        .map_err(|e| AppError::from_unknown(e, ErrorCode::Invoke))?;

    serde_json::from_value(reply).map_err(|e| AppError::from_unknown(e, ErrorCode::Invoke))
}
