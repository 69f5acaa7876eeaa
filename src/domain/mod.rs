//! Domain records shared by the store, the views and the bridge

pub mod agent;
pub mod config;
pub mod ids;
pub mod repository;
pub mod run;
pub mod skill;
pub mod validate;

pub use agent::{Agent, AgentPatch};
pub use config::{AppConfig, Tool, ToolPermission};
pub use ids::{generate_id, AgentId, RunId, SkillId};
pub use repository::Repository;
pub use run::{LogType, NewRunLog, Run, RunLog};
pub use skill::{Skill, SkillPatch};
pub use validate::{validate_agent, ValidationError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}
