//! Skill records

use serde::{Deserialize, Serialize};

use super::ids::SkillId;
use crate::constants::agent::NAME_COPY_SUFFIX;

/// A reusable capability definition referenced by id from agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    /// Opaque body, usually markdown
    #[serde(default)]
    pub content: String,
    /// Invocation strings such as `/git-commit`
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub path: String,
}

impl Skill {
    pub fn duplicate(&self, id: SkillId) -> Self {
        Self {
            id,
            name: format!("{}{}", self.name, NAME_COPY_SUFFIX),
            ..self.clone()
        }
    }
}

/// Partial update for a [`Skill`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub commands: Option<Vec<String>>,
    pub path: Option<String>,
}

impl SkillPatch {
    pub fn apply_to(&self, skill: &Skill) -> Skill {
        let mut merged = skill.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(content) = &self.content {
            merged.content = content.clone();
        }
        if let Some(commands) = &self.commands {
            merged.commands = commands.clone();
        }
        if let Some(path) = &self.path {
            merged.path = path.clone();
        }
        merged
    }
}
