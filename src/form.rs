//! Agent create/edit form
//!
//! Holds the raw text a user typed, validates it into field-scoped messages,
//! and only touches the store once validation passes.

use serde::Serialize;

use crate::constants::agent::{
    MAX_FORM_DESCRIPTION_LENGTH, MAX_FORM_MODEL_LENGTH, MAX_FORM_NAME_LENGTH,
};
use crate::domain::{Agent, AgentId, AgentPatch};
use crate::store::AppStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentForm {
    pub name: String,
    pub description: String,
    pub model: String,
    /// Comma-separated
    pub tags: String,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.model.is_none()
    }

    /// `(field, message)` pairs for display
    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("description", self.description.as_deref()),
            ("model", self.model.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|m| (field, m)))
        .collect()
    }
}

/// Cleaned form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub model: Option<String>,
    pub tags: Vec<String>,
}

impl AgentDraft {
    pub fn into_agent(self, id: AgentId) -> Agent {
        let mut agent = Agent::new(id, self.name, self.description);
        agent.model = self.model;
        agent.tags = self.tags;
        agent
    }

    pub fn into_patch(self) -> AgentPatch {
        AgentPatch::new()
            .name(self.name)
            .description(self.description)
            .model(self.model)
            .tags(self.tags)
    }
}

fn check_length(value: &str, max: usize, label: &str) -> Option<String> {
    (value.chars().count() > max).then(|| format!("{} must be at most {} characters", label, max))
}

impl AgentForm {
    /// Form pre-filled from an existing agent
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            description: agent.description.clone(),
            model: agent.model.clone().unwrap_or_default(),
            tags: agent.tags.join(", "),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let name = self.name.trim();
        let description = self.description.trim();

        let errors = FormErrors {
            name: if name.is_empty() {
                Some("Name is required".to_string())
            } else {
                check_length(name, MAX_FORM_NAME_LENGTH, "Name")
            },
            description: if description.is_empty() {
                Some("Description is required".to_string())
            } else {
                check_length(description, MAX_FORM_DESCRIPTION_LENGTH, "Description")
            },
            model: check_length(self.model.trim(), MAX_FORM_MODEL_LENGTH, "Model"),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Trimmed values; a blank model becomes `None`, blank tags are dropped
    pub fn to_draft(&self) -> AgentDraft {
        let model = self.model.trim();
        AgentDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            model: (!model.is_empty()).then(|| model.to_string()),
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Validate, then add a new agent to the store
    pub fn create_in(&self, store: &mut AppStore) -> Result<Agent, FormErrors> {
        self.validate()?;
        let agent = self.to_draft().into_agent(AgentId::generate());
        store.add_agent(agent.clone());
        Ok(agent)
    }

    /// Validate, then merge the form into an existing agent
    pub fn update_in(&self, store: &mut AppStore, id: &AgentId) -> Result<(), FormErrors> {
        self.validate()?;
        store.update_agent(id, &self.to_draft().into_patch());
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
