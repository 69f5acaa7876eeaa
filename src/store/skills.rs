//! Skill slice

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::PersistedSlice;
use crate::constants::storage_keys;
use crate::domain::{Skill, SkillId, SkillPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSlice {
    skills: Arc<Vec<Skill>>,
}

impl SkillSlice {
    pub fn skills(&self) -> &Arc<Vec<Skill>> {
        &self.skills
    }

    pub fn find(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    pub fn set_skills(&mut self, skills: Vec<Skill>) {
        debug!(count = skills.len(), "Replacing skills");
        self.skills = Arc::new(skills);
    }

    pub fn add_skill(&mut self, skill: Skill) {
        debug!(id = %skill.id, "Adding skill");
        let mut next = (*self.skills).clone();
        next.push(skill);
        self.skills = Arc::new(next);
    }

    pub fn update_skill(&mut self, id: &SkillId, patch: &SkillPatch) {
        if let Some(index) = self.position(id) {
            let mut next = (*self.skills).clone();
            next[index] = patch.apply_to(&next[index]);
            self.skills = Arc::new(next);
        }
    }

    pub fn delete_skill(&mut self, id: &SkillId) {
        if let Some(index) = self.position(id) {
            let mut next = (*self.skills).clone();
            next.remove(index);
            self.skills = Arc::new(next);
        }
    }

    pub fn duplicate_skill(&mut self, id: &SkillId) -> Option<Skill> {
        let duplicated = self.find(id)?.duplicate(SkillId::generate());
        self.add_skill(duplicated.clone());
        Some(duplicated)
    }

    fn position(&self, id: &SkillId) -> Option<usize> {
        self.skills.iter().position(|skill| &skill.id == id)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SkillsState {
    #[serde(default)]
    skills: Vec<Skill>,
}

impl PersistedSlice for SkillSlice {
    const STORAGE_KEY: &'static str = storage_keys::SKILLS;
    type State = SkillsState;

    fn to_state(&self) -> SkillsState {
        SkillsState {
            skills: (*self.skills).clone(),
        }
    }

    fn from_state(state: SkillsState) -> Self {
        Self {
            skills: Arc::new(state.skills),
        }
    }
}
