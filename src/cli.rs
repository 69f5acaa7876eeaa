use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Theme;
use crate::storage::StorageBackend;
use crate::views::{AgentSortKey, SortDirection};

/// Manage OpenCode agent configurations and inspect run history
#[derive(Parser, Debug, Clone)]
#[command(name = "ocgui", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "OCGUI_CONFIG", default_value = "ocgui.toml")]
    pub config: PathBuf,

    /// Directory for persisted state and the run database
    #[arg(long, env = "OCGUI_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Key/value backend for persisted state (file or memory)
    #[arg(long)]
    pub storage: Option<StorageBackend>,

    /// Run database URL
    #[arg(long, env = "OCGUI_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage agents
    Agents {
        #[command(subcommand)]
        command: AgentCommand,
    },
    /// List built-in agent templates
    Templates,
    /// Inspect run history
    Runs {
        #[command(subcommand)]
        command: RunCommand,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AgentCommand {
    /// List agents, optionally filtered and sorted
    List {
        /// Case-insensitive text matched against name, description, model, tags and skills
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, default_value = "name")]
        sort: AgentSortKey,

        #[arg(long, default_value = "asc")]
        order: SortDirection,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print one agent as JSON
    Show { id: String },
    /// Create an agent from fields or a template
    Create(CreateAgentArgs),
    /// Copy an agent under a new id
    Duplicate { id: String },
    /// Flip an agent's enabled flag
    Toggle { id: String },
    Delete { id: String },
    /// Select an agent, or clear the selection when no id is given
    Select { id: Option<String> },
    /// Append agents from a JSON file holding one agent or an array
    Import { path: PathBuf },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateAgentArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Template key; explicit fields override the template
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RunCommand {
    /// Most recent runs, or every run of one session
    List {
        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(long)]
        session: Option<String>,
    },
    Show { id: String },
    /// Print a run's log lines
    Logs { id: String },
    /// Delete a run and its logs
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeCommand {
    Get,
    Set { theme: Theme },
    Toggle,
}
