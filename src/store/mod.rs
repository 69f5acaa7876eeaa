//! Domain state store
//!
//! [`AppStore`] composes independent slices (agents, skills, config, runs and
//! UI preferences) behind one interface. Slices marked persisted are written
//! to storage under their own key after every action and rehydrated when the
//! store is built. The run slice is session-only.
//!
//! Persisted values use the envelope `{"state": ..., "version": 0}`.

pub mod agents;
pub mod config;
pub mod runs;
pub mod skills;
pub mod ui;

pub use agents::AgentSlice;
pub use config::ConfigSlice;
pub use runs::RunSlice;
pub use skills::SkillSlice;
pub use ui::UiSlice;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{
    Agent, AgentId, AgentPatch, AppConfig, Run, RunId, Skill, SkillId, SkillPatch, Theme,
};
use crate::storage::SafeStorage;

const STATE_VERSION: u32 = 0;

/// A slice whose state survives restarts
pub trait PersistedSlice: Default {
    const STORAGE_KEY: &'static str;
    type State: Serialize + DeserializeOwned;

    fn to_state(&self) -> Self::State;
    fn from_state(state: Self::State) -> Self;
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct StoredEnvelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Load a slice from storage, falling back to its default state
fn rehydrate<S: PersistedSlice>(storage: &SafeStorage) -> S {
    let Some(raw) = storage.get(S::STORAGE_KEY) else {
        return S::default();
    };

    match serde_json::from_str::<StoredEnvelope<S::State>>(&raw) {
        Ok(stored) => {
            if stored.version != STATE_VERSION {
                debug!(
                    key = S::STORAGE_KEY,
                    version = stored.version,
                    "Rehydrating state written by another version"
                );
            }
            S::from_state(stored.state)
        }
        Err(e) => {
            warn!(key = S::STORAGE_KEY, error = %e, "Discarding unreadable persisted state");
            S::default()
        }
    }
}

/// Write a slice snapshot; serialization and storage failures are logged and dropped
fn persist<S: PersistedSlice>(storage: &SafeStorage, slice: &S) {
    let state = slice.to_state();
    let envelope = Envelope {
        state: &state,
        version: STATE_VERSION,
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => storage.set(S::STORAGE_KEY, &json),
        Err(e) => warn!(key = S::STORAGE_KEY, error = %e, "Failed to serialize state"),
    }
}

/// The aggregate store. Construct once at start-up and pass it where needed.
#[derive(Debug)]
pub struct AppStore {
    storage: SafeStorage,
    agents: AgentSlice,
    skills: SkillSlice,
    config: ConfigSlice,
    runs: RunSlice,
    ui: UiSlice,
}

impl AppStore {
    /// Build the store, rehydrating every persisted slice from `storage`
    pub fn new(storage: SafeStorage) -> Self {
        let agents = rehydrate::<AgentSlice>(&storage);
        let skills = rehydrate::<SkillSlice>(&storage);
        let config = rehydrate::<ConfigSlice>(&storage);
        let ui = rehydrate::<UiSlice>(&storage);

        debug!(
            agents = agents.agents().len(),
            skills = skills.skills().len(),
            "Store rehydrated"
        );

        Self {
            storage,
            agents,
            skills,
            config,
            runs: RunSlice::default(),
            ui,
        }
    }

    // Read access

    pub fn agents(&self) -> &Arc<Vec<Agent>> {
        self.agents.agents()
    }

    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.find(id)
    }

    pub fn selected_agent_id(&self) -> Option<&AgentId> {
        self.agents.selected_agent_id()
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.agents.selected_agent()
    }

    pub fn skills(&self) -> &Arc<Vec<Skill>> {
        self.skills.skills()
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.find(id)
    }

    pub fn config(&self) -> Option<&Arc<AppConfig>> {
        self.config.config()
    }

    pub fn runs(&self) -> &Arc<Vec<Run>> {
        self.runs.runs()
    }

    pub fn theme(&self) -> Theme {
        self.ui.theme()
    }

    pub fn last_search_query(&self) -> &str {
        self.ui.last_search_query()
    }

    // Agent actions

    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.agents.set_agents(agents);
        persist(&self.storage, &self.agents);
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.add_agent(agent);
        persist(&self.storage, &self.agents);
    }

    pub fn update_agent(&mut self, id: &AgentId, patch: &AgentPatch) {
        self.agents.update_agent(id, patch);
        persist(&self.storage, &self.agents);
    }

    pub fn delete_agent(&mut self, id: &AgentId) {
        self.agents.delete_agent(id);
        persist(&self.storage, &self.agents);
    }

    /// Copy an agent under a fresh id; `None` (and no write) if `id` is unknown
    pub fn duplicate_agent(&mut self, id: &AgentId) -> Option<Agent> {
        let duplicated = self.agents.duplicate_agent(id)?;
        persist(&self.storage, &self.agents);
        Some(duplicated)
    }

    pub fn select_agent(&mut self, id: Option<AgentId>) {
        self.agents.select_agent(id);
        persist(&self.storage, &self.agents);
    }

    // Skill actions

    pub fn set_skills(&mut self, skills: Vec<Skill>) {
        self.skills.set_skills(skills);
        persist(&self.storage, &self.skills);
    }

    pub fn add_skill(&mut self, skill: Skill) {
        self.skills.add_skill(skill);
        persist(&self.storage, &self.skills);
    }

    pub fn update_skill(&mut self, id: &SkillId, patch: &SkillPatch) {
        self.skills.update_skill(id, patch);
        persist(&self.storage, &self.skills);
    }

    pub fn delete_skill(&mut self, id: &SkillId) {
        self.skills.delete_skill(id);
        persist(&self.storage, &self.skills);
    }

    pub fn duplicate_skill(&mut self, id: &SkillId) -> Option<Skill> {
        let duplicated = self.skills.duplicate_skill(id)?;
        persist(&self.storage, &self.skills);
        Some(duplicated)
    }

    // Config actions

    pub fn set_config(&mut self, config: Option<AppConfig>) {
        self.config.set_config(config);
        persist(&self.storage, &self.config);
    }

    // Run actions (not persisted)

    pub fn add_run(&mut self, run: Run) {
        self.runs.add_run(run);
    }

    pub fn delete_run(&mut self, id: &RunId) {
        self.runs.delete_run(id);
    }

    pub fn clear_runs(&mut self) {
        self.runs.clear_runs();
    }

    // UI actions

    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.set_theme(theme);
        persist(&self.storage, &self.ui);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.ui.toggle_theme();
        persist(&self.storage, &self.ui);
        theme
    }

    pub fn set_last_search_query(&mut self, query: impl Into<String>) {
        self.ui.set_last_search_query(query);
        persist(&self.storage, &self.ui);
    }

    /// Restore every slice to its default and persist the empty state
    pub fn reset(&mut self) {
        debug!("Resetting store");
        self.agents = AgentSlice::default();
        self.skills = SkillSlice::default();
        self.config = ConfigSlice::default();
        self.runs = RunSlice::default();
        self.ui = UiSlice::default();

        persist(&self.storage, &self.agents);
        persist(&self.storage, &self.skills);
        persist(&self.storage, &self.config);
        persist(&self.storage, &self.ui);
    }
}
