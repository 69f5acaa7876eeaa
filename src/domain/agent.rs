//! Agent records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{AgentId, SkillId};
use crate::constants::agent::NAME_COPY_SUFFIX;

/// A configured automation persona with tool/permission grants and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    /// Model override; `None` means the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tool name to permission string
    #[serde(default)]
    pub tools: BTreeMap<String, String>,
    /// Permission key to level string
    #[serde(default)]
    pub permissions: BTreeMap<String, String>,
    /// Skill ids in insertion order
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Agent {
    /// Enabled agent with no tools, permissions, skills or tags
    pub fn new(id: AgentId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            model: None,
            tools: BTreeMap::new(),
            permissions: BTreeMap::new(),
            skills: Vec::new(),
            tags: Vec::new(),
            enabled: true,
        }
    }

    /// Copy under a new id with the copy suffix appended to the name
    pub fn duplicate(&self, id: AgentId) -> Self {
        Self {
            id,
            name: format!("{}{}", self.name, NAME_COPY_SUFFIX),
            ..self.clone()
        }
    }
}

/// Partial update for an [`Agent`]; only `Some` fields overwrite.
///
/// Maps are replaced wholesale, never merged key by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the model override
    pub model: Option<Option<String>>,
    pub tools: Option<BTreeMap<String, String>>,
    pub permissions: Option<BTreeMap<String, String>>,
    pub skills: Option<Vec<SkillId>>,
    pub tags: Option<Vec<String>>,
    pub enabled: Option<bool>,
}

impl AgentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn tools(mut self, tools: BTreeMap<String, String>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn permissions(mut self, permissions: BTreeMap<String, String>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Shallow merge over `agent`, producing a new record
    pub fn apply_to(&self, agent: &Agent) -> Agent {
        let mut merged = agent.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(model) = &self.model {
            merged.model = model.clone();
        }
        if let Some(tools) = &self.tools {
            merged.tools = tools.clone();
        }
        if let Some(permissions) = &self.permissions {
            merged.permissions = permissions.clone();
        }
        if let Some(skills) = &self.skills {
            merged.skills = skills.clone();
        }
        if let Some(tags) = &self.tags {
            merged.tags = tags.clone();
        }
        if let Some(enabled) = self.enabled {
            merged.enabled = enabled;
        }
        merged
    }
}
