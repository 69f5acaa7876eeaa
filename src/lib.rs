//! # ocgui - OpenCode agent configuration data layer
//!
//! The state, persistence and backend plumbing behind the OpenCode GUI,
//! usable without any rendering layer.
//!
//! ## Features
//!
//! - **Store**: agent, skill, config, run and UI slices composed into one
//!   [`store::AppStore`], persisted per slice through a key/value facility
//! - **Views**: memoized multi-field search and keyed sorting of agents
//! - **Bridge**: typed run/run-log commands with wire-shape adaptation and
//!   uniform [`error::AppError`] wrapping
//! - **Run database**: SQLite schema, migrations and an in-process bridge
//! - **Timers**: debounced values and auto-dismissing toasts
//! - **Sanitizers**: HTML escaping, path, id and protocol checks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocgui::domain::{Agent, AgentId};
//! use ocgui::storage::{MemoryStorage, SafeStorage};
//! use ocgui::store::AppStore;
//! use std::sync::Arc;
//!
//! let mut store = AppStore::new(SafeStorage::new(Arc::new(MemoryStorage::new())));
//! store.add_agent(Agent::new(AgentId::generate(), "Reviewer", "Reviews code"));
//! assert_eq!(store.agents().len(), 1);
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: records, ids, patches and record validation
//! - **Store / Views**: in-memory state and derived views over it
//! - **Bridge / Backend / Persistence**: the run history boundary
//! - **Config / CLI / Commands**: the `ocgui` binary

pub mod backend;
pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod form;
pub mod persistence;
pub mod sanitize;
pub mod storage;
pub mod store;
pub mod templates;
pub mod timing;
pub mod views;

pub use error::{AppError, AppResult, ErrorCode};
