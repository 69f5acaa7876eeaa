mod common;

use common::ScriptedBridge;
use ocgui::bridge::{commands, RunsApi};
use ocgui::domain::{LogType, NewRunLog, Run, RunId};
use ocgui::error::ErrorCode;
use ocgui::timing::{ToastKind, ToastQueue};
use serde_json::json;
use std::error::Error;
use std::sync::Arc;

fn wire_run(id: &str, tools_used: &str) -> serde_json::Value {
    json!({
        "id": id,
        "session_id": "s1",
        "timestamp": 1_700_000_000_000i64,
        "agent": "reviewer",
        "model": "gpt-4",
        "input": "review src/",
        "output": "2 issues",
        "tools_used": tools_used,
        "exit_status": 0
    })
}

#[tokio::test]
async fn test_get_all_adapts_wire_records() -> anyhow::Result<()> {
    let bridge = Arc::new(ScriptedBridge::new().reply(
        commands::GET_RUNS,
        json!([wire_run("r1", r#"["read","grep"]"#), wire_run("r2", "not json")]),
    ));
    let runs = RunsApi::new(bridge.clone());

    let list = runs.get_all(None).await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].tools_used, vec!["read".to_string(), "grep".to_string()]);
    assert_eq!(list[0].session_id, "s1");
    assert!(list[1].tools_used.is_empty());

    let calls = bridge.calls();
    assert_eq!(calls, vec![(commands::GET_RUNS.to_string(), json!({ "limit": 100 }))]);
    Ok(())
}

#[tokio::test]
async fn test_argument_names() -> anyhow::Result<()> {
    let bridge = Arc::new(
        ScriptedBridge::new()
            .reply(commands::GET_RUN_BY_ID, json!(null))
            .reply(commands::GET_RUNS_BY_SESSION, json!([]))
            .reply(commands::GET_RUN_LOGS, json!([])),
    );
    let runs = RunsApi::new(bridge.clone()).with_default_limit(25);

    assert!(runs.get_by_id(&RunId::from("r9")).await?.is_none());
    runs.get_by_session("s1").await?;
    runs.get_logs(&RunId::from("r1")).await?;
    runs.delete(&RunId::from("r1")).await?;
    runs.get_all(None).await?;

    let args: Vec<_> = bridge.calls().into_iter().map(|(_, args)| args).collect();
    assert_eq!(
        args,
        vec![
            json!({ "runId": "r9" }),
            json!({ "sessionId": "s1" }),
            json!({ "runId": "r1" }),
            json!({ "runId": "r1" }),
            json!({ "limit": 25 }),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_add_sends_compact_tools_used() -> anyhow::Result<()> {
    let bridge = Arc::new(ScriptedBridge::new());
    let runs = RunsApi::new(bridge.clone());
    let run = Run {
        id: RunId::from("r1"),
        session_id: "s1".to_string(),
        timestamp: 1,
        agent: "reviewer".to_string(),
        model: "gpt-4".to_string(),
        input: String::new(),
        output: String::new(),
        tools_used: vec!["a".to_string(), "b".to_string()],
        exit_status: 2,
    };

    runs.add(&run).await?;

    let (command, args) = bridge.calls().remove(0);
    assert_eq!(command, commands::ADD_RUN);
    assert_eq!(args["run"]["tools_used"], r#"["a","b"]"#);
    assert_eq!(args["run"]["session_id"], "s1");
    assert_eq!(args["run"]["exit_status"], 2);
    Ok(())
}

#[tokio::test]
async fn test_add_log_returns_backend_id() -> anyhow::Result<()> {
    let bridge = Arc::new(ScriptedBridge::new().reply(commands::ADD_RUN_LOG, json!(42)));
    let runs = RunsApi::new(bridge.clone());
    let log = NewRunLog {
        run_id: RunId::from("r1"),
        log_line: "calling grep".to_string(),
        log_type: LogType::ToolCall,
        timestamp: 5,
    };

    assert_eq!(runs.add_log(&log).await?, 42);

    let (_, args) = bridge.calls().remove(0);
    assert_eq!(args["log"]["id"], 0);
    assert_eq!(args["log"]["log_type"], "tool_call");
    assert_eq!(args["log"]["run_id"], "r1");
    Ok(())
}

#[tokio::test]
async fn test_failures_become_invoke_errors() {
    let bridge = Arc::new(ScriptedBridge::new().fail(commands::DELETE_RUN, "database is locked"));
    let runs = RunsApi::new(bridge);

    let err = runs.delete(&RunId::from("r1")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Invoke);
    assert_eq!(err.message(), "database is locked");
    assert!(err.cause().is_some());
    assert!(err.source().is_some());
    assert!(!err.is_recoverable());

    let toasts = ToastQueue::default();
    toasts.error(&err);
    let toast = toasts.toasts().remove(0);
    assert_eq!(toast.kind, ToastKind::Error);
    assert_ne!(toast.message, "database is locked");
}

#[tokio::test]
async fn test_reply_of_wrong_shape_is_invoke_error() {
    let bridge = Arc::new(ScriptedBridge::new().reply(commands::GET_RUNS, json!({ "runs": [] })));
    let runs = RunsApi::new(bridge);

    let err = runs.get_all(Some(5)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Invoke);
}
