#![allow(dead_code)]

use async_trait::async_trait;
use ocgui::bridge::Bridge;
use ocgui::domain::{Agent, AgentId, SkillId};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn agent(id: &str, name: &str) -> Agent {
    Agent::new(AgentId::from(id), name, format!("{} agent", name))
}

/// Agents with distinct names, skill counts and tool counts
pub fn sample_agents() -> Vec<Agent> {
    let mut reviewer = agent("a1", "Code Reviewer");
    reviewer.skills = vec![SkillId::from("code-review"), SkillId::from("security")];
    reviewer.tags = vec!["review".to_string()];
    reviewer.tools.insert("read".to_string(), "allow".to_string());

    let mut writer = agent("a2", "Test Writer");
    writer.skills = vec![SkillId::from("testing")];
    writer.enabled = false;

    let mut devops = agent("a3", "DevOps Agent");
    devops.skills = vec![
        SkillId::from("ci-cd"),
        SkillId::from("docker"),
        SkillId::from("kubernetes"),
    ];
    devops.model = Some("claude-sonnet".to_string());

    vec![reviewer, writer, devops]
}

/// Bridge answering from a canned table and recording every call
#[derive(Default)]
pub struct ScriptedBridge {
    replies: Mutex<HashMap<String, Result<Value, String>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, command: &str, value: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), Ok(value));
        self
    }

    pub fn fail(self, command: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bridge for ScriptedBridge {
    async fn invoke(&self, command: &str, args: Value) -> anyhow::Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args));
        match self.replies.lock().unwrap().get(command) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(Value::Null),
        }
    }
}
