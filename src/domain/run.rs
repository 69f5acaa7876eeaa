//! Run history records (internal shape)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RunId;

/// A recorded execution of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: RunId,
    pub session_id: String,
    /// Start time, epoch milliseconds
    pub timestamp: i64,
    /// Agent identifier that executed the run
    pub agent: String,
    pub model: String,
    pub input: String,
    pub output: String,
    /// Tool names in invocation order
    pub tools_used: Vec<String>,
    /// 0 on success
    pub exit_status: i32,
}

/// Classification of a run log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    #[default]
    Info,
    Error,
    Warning,
    ToolCall,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Info => "info",
            LogType::Error => "error",
            LogType::Warning => "warning",
            LogType::ToolCall => "tool_call",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(LogType::Info),
            "error" => Ok(LogType::Error),
            "warning" => Ok(LogType::Warning),
            "tool_call" => Ok(LogType::ToolCall),
            other => Err(format!("unknown log type: {}", other)),
        }
    }
}

/// A single log line of a run; `id` is assigned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLog {
    pub id: i64,
    pub run_id: RunId,
    pub log_line: String,
    pub log_type: LogType,
    pub timestamp: i64,
}

/// A log line not yet stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRunLog {
    pub run_id: RunId,
    pub log_line: String,
    pub log_type: LogType,
    pub timestamp: i64,
}

impl NewRunLog {
    pub fn with_id(self, id: i64) -> RunLog {
        RunLog {
            id,
            run_id: self.run_id,
            log_line: self.log_line,
            log_type: self.log_type,
            timestamp: self.timestamp,
        }
    }
}
