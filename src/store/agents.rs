//! Agent slice: the agent collection and the current selection

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::PersistedSlice;
use crate::constants::storage_keys;
use crate::domain::{Agent, AgentId, AgentPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentSlice {
    agents: Arc<Vec<Agent>>,
    selected_agent_id: Option<AgentId>,
}

impl AgentSlice {
    /// Current collection; a new `Arc` is swapped in on every mutation
    pub fn agents(&self) -> &Arc<Vec<Agent>> {
        &self.agents
    }

    pub fn selected_agent_id(&self) -> Option<&AgentId> {
        self.selected_agent_id.as_ref()
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        let id = self.selected_agent_id.as_ref()?;
        self.find(id)
    }

    pub fn find(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| &agent.id == id)
    }

    /// Replace the whole collection verbatim
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        debug!(count = agents.len(), "Replacing agents");
        self.agents = Arc::new(agents);
    }

    pub fn add_agent(&mut self, agent: Agent) {
        debug!(id = %agent.id, "Adding agent");
        let mut next = Vec::with_capacity(self.agents.len() + 1);
        next.extend(self.agents.iter().cloned());
        next.push(agent);
        self.agents = Arc::new(next);
    }

    /// Merge `patch` over the first agent with `id`; missing ids are ignored
    pub fn update_agent(&mut self, id: &AgentId, patch: &AgentPatch) {
        let Some(index) = self.position(id) else {
            debug!(%id, "Update of unknown agent ignored");
            return;
        };
        let mut next = (*self.agents).clone();
        next[index] = patch.apply_to(&next[index]);
        self.agents = Arc::new(next);
    }

    /// Remove the first agent with `id`, clearing the selection if it pointed there
    pub fn delete_agent(&mut self, id: &AgentId) {
        if let Some(index) = self.position(id) {
            let mut next = (*self.agents).clone();
            next.remove(index);
            self.agents = Arc::new(next);
        }
        if self.selected_agent_id.as_ref() == Some(id) {
            self.selected_agent_id = None;
        }
    }

    /// Append a copy of the agent under a fresh id and return it
    pub fn duplicate_agent(&mut self, id: &AgentId) -> Option<Agent> {
        let duplicated = self.find(id)?.duplicate(AgentId::generate());
        self.add_agent(duplicated.clone());
        Some(duplicated)
    }

    /// Set the selection without checking that the id exists
    pub fn select_agent(&mut self, id: Option<AgentId>) {
        self.selected_agent_id = id;
    }

    fn position(&self, id: &AgentId) -> Option<usize> {
        self.agents.iter().position(|agent| &agent.id == id)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentsState {
    #[serde(default)]
    agents: Vec<Agent>,
    #[serde(default)]
    selected_agent_id: Option<AgentId>,
}

impl PersistedSlice for AgentSlice {
    const STORAGE_KEY: &'static str = storage_keys::AGENTS;
    type State = AgentsState;

    fn to_state(&self) -> AgentsState {
        AgentsState {
            agents: (*self.agents).clone(),
            selected_agent_id: self.selected_agent_id.clone(),
        }
    }

    fn from_state(state: AgentsState) -> Self {
        Self {
            agents: Arc::new(state.agents),
            selected_agent_id: state.selected_agent_id,
        }
    }
}
