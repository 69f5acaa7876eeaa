//! Agent ordering

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Memo;
use crate::domain::Agent;

/// Sort field options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentSortKey {
    #[default]
    Name,
    Status,
    Skills,
    Tools,
}

impl AgentSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentSortKey::Name => "name",
            AgentSortKey::Status => "status",
            AgentSortKey::Skills => "skills",
            AgentSortKey::Tools => "tools",
        }
    }
}

impl fmt::Display for AgentSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(AgentSortKey::Name),
            "status" => Ok(AgentSortKey::Status),
            "skills" => Ok(AgentSortKey::Skills),
            "tools" => Ok(AgentSortKey::Tools),
            other => Err(format!(
                "unknown sort key '{}', expected name, status, skills or tools",
                other
            )),
        }
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}', expected asc or desc", other)),
        }
    }
}

/// Root-locale collator; `None` falls back to case-folded code point order
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("collation data unavailable, sorting names by code point: {}", e);
            None
        }
    }
}

fn compare_names(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    };
    primary.then_with(|| a.cmp(b))
}

fn compare(
    collator: Option<&CollatorBorrowed<'_>>,
    key: AgentSortKey,
    a: &Agent,
    b: &Agent,
) -> Ordering {
    match key {
        AgentSortKey::Name => compare_names(collator, &a.name, &b.name),
        // Enabled first when ascending
        AgentSortKey::Status => b.enabled.cmp(&a.enabled),
        AgentSortKey::Skills => a.skills.len().cmp(&b.skills.len()),
        AgentSortKey::Tools => a.tools.len().cmp(&b.tools.len()),
    }
}

/// Stable sort into a new vector; `agents` is left untouched
pub fn sort_agents(agents: &[Agent], key: AgentSortKey, direction: SortDirection) -> Vec<Agent> {
    let collator = match key {
        AgentSortKey::Name => name_collator(),
        _ => None,
    };
    let mut sorted = agents.to_vec();
    sorted.sort_by(|a, b| {
        let cmp = compare(collator.as_ref(), key, a, b);
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
    sorted
}

/// Memoized agent ordering
#[derive(Debug, Default)]
pub struct AgentSort {
    memo: Memo<Agent, (AgentSortKey, SortDirection), Arc<Vec<Agent>>>,
}

impl AgentSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted(
        &mut self,
        agents: &Arc<Vec<Agent>>,
        key: AgentSortKey,
        direction: SortDirection,
    ) -> Arc<Vec<Agent>> {
        self.memo
            .get_or_compute(agents, &(key, direction), |agents, (key, direction)| {
                Arc::new(sort_agents(agents, *key, *direction))
            })
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgentId, SkillId};

    fn agent(id: &str, name: &str, skills: usize, tools: usize, enabled: bool) -> Agent {
        let mut agent = Agent::new(AgentId::from(id), name, "");
        agent.skills = (0..skills).map(|i| SkillId::new(format!("s{}", i))).collect();
        agent.tools = (0..tools)
            .map(|i| (format!("tool{}", i), "allow".to_string()))
            .collect();
        agent.enabled = enabled;
        agent
    }

    fn ids(agents: &[Agent]) -> Vec<&str> {
        agents.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_skills() {
        let agents = vec![
            agent("three", "C", 3, 0, true),
            agent("one", "A", 1, 0, true),
            agent("two", "B", 2, 0, true),
        ];
        let asc = sort_agents(&agents, AgentSortKey::Skills, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["one", "two", "three"]);
        let desc = sort_agents(&agents, AgentSortKey::Skills, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["three", "two", "one"]);
        // Input untouched
        assert_eq!(ids(&agents), vec!["three", "one", "two"]);
    }

    #[test]
    fn test_sort_by_status_enabled_first_ascending() {
        let agents = vec![
            agent("off", "A", 0, 0, false),
            agent("on", "B", 0, 0, true),
        ];
        let asc = sort_agents(&agents, AgentSortKey::Status, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["on", "off"]);
        let desc = sort_agents(&agents, AgentSortKey::Status, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["off", "on"]);
    }

    #[test]
    fn test_sort_by_tools() {
        let agents = vec![agent("many", "A", 0, 4, true), agent("few", "B", 0, 1, true)];
        let asc = sort_agents(&agents, AgentSortKey::Tools, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["few", "many"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let agents = vec![
            agent("b", "beta", 0, 0, true),
            agent("A", "Alpha", 0, 0, true),
            agent("a", "alpha", 0, 0, true),
            agent("g", "Gamma", 0, 0, true),
        ];
        let asc = sort_agents(&agents, AgentSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["a", "A", "b", "g"]);

        // Accented names sort with their base letter
        let accented = vec![
            agent("z", "Zed", 0, 0, true),
            agent("e", "\u{c9}mile", 0, 0, true),
            agent("f", "Frank", 0, 0, true),
            agent("o", "\u{f6}rjan", 0, 0, true),
        ];
        let asc = sort_agents(&accented, AgentSortKey::Name, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["e", "f", "o", "z"]);
        let desc = sort_agents(&accented, AgentSortKey::Name, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["z", "o", "f", "e"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let agents = vec![
            agent("x", "X", 1, 0, true),
            agent("y", "Y", 1, 0, true),
            agent("z", "Z", 1, 0, true),
        ];
        let sorted = sort_agents(&agents, AgentSortKey::Skills, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_parse_key_and_direction() {
        assert_eq!("tools".parse::<AgentSortKey>().unwrap(), AgentSortKey::Tools);
        assert!("size".parse::<AgentSortKey>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
    }

    #[test]
    fn test_agent_sort_memoizes() {
        let agents = Arc::new(vec![agent("b", "B", 0, 0, true), agent("a", "A", 0, 0, true)]);
        let mut view = AgentSort::new();
        let first = view.sorted(&agents, AgentSortKey::Name, SortDirection::Asc);
        let second = view.sorted(&agents, AgentSortKey::Name, SortDirection::Asc);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(view.recomputations(), 1);
        assert_eq!(ids(&first), vec!["a", "b"]);
    }
}
