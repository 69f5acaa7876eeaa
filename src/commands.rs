//! Command execution for the `ocgui` binary
//!
//! Agent, template and theme commands work on the persisted [`AppStore`];
//! run commands go through [`RunsApi`] over the in-process SQLite backend.
//! Output is written to the supplied writer so callers can capture it.

use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::SqliteBackend;
use crate::bridge::RunsApi;
use crate::cli::{AgentCommand, Cli, Command, CreateAgentArgs, RunCommand, ThemeCommand};
use crate::config::Settings;
use crate::domain::validate::into_app_error;
use crate::domain::{validate_agent, Agent, AgentId, AgentPatch, RunId};
use crate::error::{AppError, ErrorCode};
use crate::form::AgentForm;
use crate::persistence::pool::is_memory_url;
use crate::persistence::DataStore;
use crate::sanitize::contains_dangerous_patterns;
use crate::storage::{create_storage, SafeStorage};
use crate::store::AppStore;
use crate::templates::{create_agent_from_template, template, template_keys};
use crate::views::{search_items, sort_agents, AgentSortKey, SortDirection};

/// Store backed by the configured key/value storage
pub fn open_store(settings: &Settings) -> anyhow::Result<AppStore> {
    let storage = create_storage(settings.storage.backend, &settings.storage.data_dir)
        .with_context(|| {
            format!(
                "Failed to open {} storage at {}",
                settings.storage.backend,
                settings.storage.data_dir.display()
            )
        })?;
    Ok(AppStore::new(SafeStorage::new(storage)))
}

/// Run adapter over a freshly opened run database
pub async fn open_runs(settings: &Settings) -> anyhow::Result<RunsApi> {
    let config = settings.persistence_config();
    if !is_memory_url(&config.url) {
        fs::create_dir_all(&settings.storage.data_dir)?;
    }
    let store = DataStore::new(&config).await?;
    let backend = SqliteBackend::from_store(&store);
    Ok(RunsApi::new(Arc::new(backend)).with_default_limit(settings.runs.default_limit))
}

pub async fn run(cli: &Cli, settings: &Settings, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Command::Agents { command } => {
            let mut store = open_store(settings)?;
            agents(command, &mut store, settings, out)
        }
        Command::Templates => templates(out),
        Command::Runs { command } => {
            let runs = open_runs(settings).await?;
            runs_command(command, &runs, out).await
        }
        Command::Theme { command } => {
            let mut store = open_store(settings)?;
            theme(command.unwrap_or(ThemeCommand::Get), &mut store, out)
        }
    }
}

fn find_agent<'a>(store: &'a AppStore, id: &AgentId) -> anyhow::Result<&'a Agent> {
    store
        .agent(id)
        .ok_or_else(|| anyhow!("Agent not found: {}", id))
}

fn write_agent_row(out: &mut dyn Write, agent: &Agent) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<24} {:<8} {:>6} {:>5}  {}",
        agent.id,
        if agent.enabled { "enabled" } else { "disabled" },
        agent.skills.len(),
        agent.tools.len(),
        agent.name
    )
}

pub fn agents(
    command: &AgentCommand,
    store: &mut AppStore,
    settings: &Settings,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        AgentCommand::List {
            search,
            sort,
            order,
            json,
        } => list_agents(store, settings, search.as_deref(), *sort, *order, *json, out),
        AgentCommand::Show { id } => {
            let agent = find_agent(store, &AgentId::from(id.as_str()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(agent)?)?;
            Ok(())
        }
        AgentCommand::Create(args) => {
            let agent = create_agent(args, store)?;
            info!(id = %agent.id, name = %agent.name, "Agent created");
            writeln!(out, "{}", agent.id)?;
            Ok(())
        }
        AgentCommand::Duplicate { id } => {
            let copy = store
                .duplicate_agent(&AgentId::from(id.as_str()))
                .ok_or_else(|| anyhow!("Agent not found: {}", id))?;
            writeln!(out, "{}", copy.id)?;
            Ok(())
        }
        AgentCommand::Toggle { id } => {
            let id = AgentId::from(id.as_str());
            let enabled = !find_agent(store, &id)?.enabled;
            store.update_agent(&id, &AgentPatch::new().enabled(enabled));
            writeln!(out, "{} {}", id, if enabled { "enabled" } else { "disabled" })?;
            Ok(())
        }
        AgentCommand::Delete { id } => {
            let id = AgentId::from(id.as_str());
            find_agent(store, &id)?;
            store.delete_agent(&id);
            writeln!(out, "Deleted {}", id)?;
            Ok(())
        }
        AgentCommand::Select { id } => {
            let id = id.as_deref().map(AgentId::from);
            if let Some(id) = &id {
                find_agent(store, id)?;
            }
            store.select_agent(id);
            Ok(())
        }
        AgentCommand::Import { path } => {
            let count = import_agents(path, store)?;
            writeln!(out, "Imported {} agent(s)", count)?;
            Ok(())
        }
    }
}

fn list_agents(
    store: &mut AppStore,
    settings: &Settings,
    query: Option<&str>,
    sort: AgentSortKey,
    order: SortDirection,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if let Some(query) = query {
        let length = query.trim().chars().count();
        if length > 0 && length < settings.search.min_query_length {
            debug!(query, "Search query shorter than the suggested minimum");
        }
        store.set_last_search_query(query);
    }

    let results = search_items(store.agents(), query.unwrap_or_default());
    let sorted = sort_agents(&results.filtered, sort, order);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&sorted)?)?;
        return Ok(());
    }

    if !results.has_results {
        writeln!(out, "No agents found")?;
        return Ok(());
    }
    for agent in &sorted {
        write_agent_row(out, agent)?;
    }
    Ok(())
}

fn create_agent(args: &CreateAgentArgs, store: &mut AppStore) -> anyhow::Result<Agent> {
    if let Some(key) = &args.template {
        let mut overrides = AgentPatch::new();
        if let Some(name) = &args.name {
            overrides = overrides.name(name.trim());
        }
        if let Some(description) = &args.description {
            overrides = overrides.description(description.trim());
        }
        if let Some(model) = &args.model {
            overrides = overrides.model(Some(model.trim().to_string()));
        }
        if let Some(tags) = &args.tags {
            let form = AgentForm {
                tags: tags.clone(),
                ..Default::default()
            };
            overrides = overrides.tags(form.to_draft().tags);
        }

        let agent = create_agent_from_template(key, &overrides).ok_or_else(|| {
            AppError::new(
                ErrorCode::Validation,
                format!(
                    "Unknown template '{}', expected one of: {}",
                    key,
                    template_keys().join(", ")
                ),
            )
        })?;
        store.add_agent(agent.clone());
        return Ok(agent);
    }

    let form = AgentForm {
        name: args.name.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        model: args.model.clone().unwrap_or_default(),
        tags: args.tags.clone().unwrap_or_default(),
    };
    form.create_in(store).map_err(|errors| {
        let messages: Vec<String> = errors
            .messages()
            .into_iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        AppError::new(ErrorCode::Validation, messages.join("; ")).into()
    })
}

/// Validate every record in `path` first, then append them all
pub fn import_agents(path: &Path, store: &mut AppStore) -> anyhow::Result<usize> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::from_unknown(e, ErrorCode::Validation))?;

    let records = match value {
        Value::Array(records) => records,
        record => vec![record],
    };

    let mut agents = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        validate_agent(&record).map_err(|errors| {
            let error = into_app_error(&errors);
            anyhow!("Record {}: {}", index, error)
        })?;
        let agent: Agent = serde_json::from_value(record)
            .map_err(|e| AppError::from_unknown(e, ErrorCode::Validation))?;
        if contains_dangerous_patterns(&agent.name) || contains_dangerous_patterns(&agent.description)
        {
            warn!(id = %agent.id, "Imported agent contains markup-like content");
        }
        agents.push(agent);
    }

    let count = agents.len();
    for agent in agents {
        store.add_agent(agent);
    }
    Ok(count)
}

fn templates(out: &mut dyn Write) -> anyhow::Result<()> {
    for key in template_keys() {
        if let Some(template) = template(key) {
            writeln!(
                out,
                "{:<20} {:<20} {}",
                key, template.name, template.description
            )?;
        }
    }
    Ok(())
}

pub async fn runs_command(
    command: &RunCommand,
    runs: &RunsApi,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        RunCommand::List { limit, session } => {
            let list = match session {
                Some(session) => runs.get_by_session(session).await?,
                None => runs.get_all(*limit).await?,
            };
            if list.is_empty() {
                writeln!(out, "No runs found")?;
            }
            for run in &list {
                writeln!(
                    out,
                    "{:<24} {:<20} {:<16} {:>4}  {}",
                    run.id, run.session_id, run.agent, run.exit_status, run.model
                )?;
            }
        }
        RunCommand::Show { id } => match runs.get_by_id(&RunId::from(id.as_str())).await? {
            Some(run) => writeln!(out, "{}", serde_json::to_string_pretty(&run)?)?,
            None => bail!("Run not found: {}", id),
        },
        RunCommand::Logs { id } => {
            for log in runs.get_logs(&RunId::from(id.as_str())).await? {
                writeln!(out, "{} [{}] {}", log.timestamp, log.log_type, log.log_line)?;
            }
        }
        RunCommand::Delete { id } => {
            runs.delete(&RunId::from(id.as_str())).await?;
            writeln!(out, "Deleted {}", id)?;
        }
    }
    Ok(())
}

fn theme(command: ThemeCommand, store: &mut AppStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let theme = match command {
        ThemeCommand::Get => store.theme(),
        ThemeCommand::Set { theme } => {
            store.set_theme(theme);
            theme
        }
        ThemeCommand::Toggle => store.toggle_theme(),
    };
    writeln!(out, "{}", theme)?;
    Ok(())
}
