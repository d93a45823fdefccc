//! # Core Application Logic
//!
//! Everything mailview knows about folders, messages and input history.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • History, completion  │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the folder/message entries it holds
//! - [`action`]: The `Action` enum and its reducer
//! - [`history`]: Lines the editor has returned
//! - [`completion`]: The completion catalog and its lookup
//! - [`config`]: TOML configuration and its resolution
//! - [`snapshot`]: Folder and message data loaded from disk

pub mod action;
pub mod completion;
pub mod config;
pub mod history;
pub mod snapshot;
pub mod state;
