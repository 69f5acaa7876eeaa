//! The single application configuration record

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::agent::Agent;

/// Permission level of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolPermission {
    Allow,
    Deny,
    #[default]
    Ask,
}

/// A tool agents can invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool parameters
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub permission: ToolPermission,
}

/// Root configuration; replaced wholesale, never patched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider name to opaque provider settings
    #[serde(default)]
    pub providers: BTreeMap<String, Value>,
    /// Historical copy of the agent list
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub tools: BTreeMap<String, Tool>,
    /// Feature flags
    #[serde(default)]
    pub experimental: BTreeMap<String, bool>,
}
