//! Built-in agent templates

use std::collections::BTreeMap;

use crate::domain::{Agent, AgentId, AgentPatch, SkillId};

/// Starting point for a new agent
#[derive(Debug, Clone, Copy)]
pub struct AgentTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub default_tools: &'static [(&'static str, &'static str)],
    pub default_permissions: &'static [(&'static str, &'static str)],
    pub suggested_skills: &'static [&'static str],
    pub default_tags: &'static [&'static str],
}

static TEMPLATES: &[(&str, AgentTemplate)] = &[
    (
        "codeReviewer",
        AgentTemplate {
            name: "Code Reviewer",
            description: "Reviews code for quality, security, and best practices",
            default_tools: &[("read", "allow"), ("grep", "allow"), ("glob", "allow")],
            default_permissions: &[("file", "read")],
            suggested_skills: &["code-review", "security-analysis"],
            default_tags: &["code-quality", "review"],
        },
    ),
    (
        "testWriter",
        AgentTemplate {
            name: "Test Writer",
            description: "Generates unit tests and integration tests for code",
            default_tools: &[("read", "allow"), ("write", "allow"), ("bash", "allow")],
            default_permissions: &[("file", "write"), ("execute", "ask")],
            suggested_skills: &["testing", "test-coverage"],
            default_tags: &["testing", "quality"],
        },
    ),
    (
        "documentationAgent",
        AgentTemplate {
            name: "Documentation Agent",
            description: "Creates and maintains project documentation",
            default_tools: &[("read", "allow"), ("write", "allow"), ("glob", "allow")],
            default_permissions: &[("file", "write")],
            suggested_skills: &["documentation", "markdown"],
            default_tags: &["documentation", "content"],
        },
    ),
    (
        "devopsAgent",
        AgentTemplate {
            name: "DevOps Agent",
            description: "Manages CI/CD pipelines and infrastructure",
            default_tools: &[("bash", "allow"), ("read", "allow"), ("write", "allow")],
            default_permissions: &[("execute", "ask"), ("file", "write"), ("network", "ask")],
            suggested_skills: &["ci-cd", "docker", "kubernetes"],
            default_tags: &["devops", "infrastructure"],
        },
    ),
];

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Template keys in declaration order
pub fn template_keys() -> Vec<&'static str> {
    TEMPLATES.iter().map(|(key, _)| *key).collect()
}

pub fn template(key: &str) -> Option<&'static AgentTemplate> {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, template)| template)
}

/// Enabled agent with a fresh id built from a template, then `overrides`
pub fn create_agent_from_template(key: &str, overrides: &AgentPatch) -> Option<Agent> {
    let template = template(key)?;

    let mut agent = Agent::new(AgentId::generate(), template.name, template.description);
    agent.tools = to_map(template.default_tools);
    agent.permissions = to_map(template.default_permissions);
    agent.skills = template
        .suggested_skills
        .iter()
        .map(|skill| SkillId::from(*skill))
        .collect();
    agent.tags = template.default_tags.iter().map(|tag| tag.to_string()).collect();

    Some(overrides.apply_to(&agent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_keys_in_order() {
        assert_eq!(
            template_keys(),
            vec!["codeReviewer", "testWriter", "documentationAgent", "devopsAgent"]
        );
    }

    #[test]
    fn test_create_from_template() {
        let agent = create_agent_from_template("devopsAgent", &AgentPatch::new()).unwrap();
        assert_eq!(agent.name, "DevOps Agent");
        assert!(agent.enabled);
        assert_eq!(agent.permissions.get("network").map(String::as_str), Some("ask"));
        assert_eq!(agent.skills.len(), 3);
        assert!(agent.model.is_none());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = AgentPatch::new().name("Strict Reviewer").enabled(false);
        let agent = create_agent_from_template("codeReviewer", &overrides).unwrap();
        assert_eq!(agent.name, "Strict Reviewer");
        assert!(!agent.enabled);
        assert_eq!(agent.tags, vec!["code-quality".to_string(), "review".to_string()]);
    }

    #[test]
    fn test_fresh_ids_and_unknown_key() {
        let a = create_agent_from_template("testWriter", &AgentPatch::new()).unwrap();
        let b = create_agent_from_template("testWriter", &AgentPatch::new()).unwrap();
        assert_ne!(a.id, b.id);
        assert!(create_agent_from_template("janitor", &AgentPatch::new()).is_none());
    }
}
