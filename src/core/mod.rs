//! # Core Application Logic
//!
//! This module contains the simulator's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!               ┌────────────────┴────────────────┐
//!               ▼                                 ▼
//!        ┌────────────┐                    ┌────────────┐
//!        │    TUI     │                    │  dispatch  │
//!        │  Adapter   │                    │ (backend   │
//!        │ (ratatui)  │                    │   call)    │
//!        └────────────┘                    └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`agent`]: The four demo agents and their labels
//! - [`message`]: Transcript messages and the fixed texts shown in the chat
//! - [`state`]: The `App` struct, all simulator state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dispatch`]: Runs an outbound request against a backend
//! - [`config`]: Config file, env vars and CLI resolution

pub mod action;
pub mod agent;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod state;
