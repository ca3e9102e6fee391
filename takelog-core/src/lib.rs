//! # takelog-core
//!
//! Engine for the take log. Owns the row repository, the draft, undo history,
//! project workspace, persistence and CSV/JSON interchange, independent of
//! any front end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use takelog_core::config::Config;
//! use takelog_core::dispatch::dispatch_action;
//! use takelog_core::state::{AppState, SqliteStore};
//! use takelog_types::{Action, DraftAction};
//!
//! // 1. Load config and open the store
//! let config = Config::load();
//! let mut store = SqliteStore::open(&config.storage_path())?;
//!
//! // 2. Restore projects and preferences
//! let mut state = AppState::load(&config, &store);
//!
//! // 3. Dispatch actions (undo snapshots and persistence are handled here)
//! dispatch_action(&Action::Draft(DraftAction::SetNote("wind".into())), &mut state, &mut store);
//! let result = dispatch_action(&Action::Commit, &mut state, &mut store);
//!
//! // 4. Report result.status to the operator
//! ```
//!
//! ## Module Overview
//!
//! - [`state`]: `AppState`, take repository, draft controller, file-number
//!   sequence, undo history, workspace, preferences, key-value persistence
//! - [`dispatch`]: `dispatch_action()`, the single entry point for row and
//!   draft mutation, plus import/export against the current project
//! - [`interchange`]: CSV and JSON codecs
//! - [`config`]: TOML configuration loading (embedded + user override)

pub mod config;
pub mod dispatch;
pub mod interchange;
pub mod state;

pub use takelog_types as types;
