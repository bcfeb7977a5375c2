//! # Application State
//!
//! Core simulator state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn SimulateBackend>  // where replies come from
//! ├── agent: Agent                       // selected demo agent
//! ├── transcript: Transcript             // messages of the current session
//! ├── state_label: String                // last reported conversation state
//! ├── submission: Submission             // Idle or Pending(ticket)
//! ├── session_id: Uuid                   // changes on every agent switch
//! ├── phone: String                      // user identifier sent to the API
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::agent::Agent;
use crate::core::config::ResolvedConfig;
use crate::core::message::{INITIAL_STATE, Transcript};
use crate::simulate::SimulateBackend;

/// Identifies one outbound request and the transcript session it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: Uuid,
    pub seq: u64,
}

/// The submission flag, as an explicit two-phase state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Submission {
    #[default]
    Idle,
    /// One request is outstanding; further submissions are refused.
    Pending(Ticket),
}

impl Submission {
    pub fn is_pending(&self) -> bool {
        matches!(self, Submission::Pending(_))
    }
}

pub struct App {
    pub backend: Arc<dyn SimulateBackend>,
    pub agent: Agent,
    pub transcript: Transcript,
    pub state_label: String,
    pub submission: Submission,
    pub session_id: Uuid,
    pub phone: String,
    pub status_message: String,
    next_seq: u64,
}

impl App {
    pub fn new(backend: Arc<dyn SimulateBackend>, agent: Agent, phone: String) -> Self {
        Self {
            backend,
            agent,
            transcript: Transcript::greeting(),
            state_label: INITIAL_STATE.to_string(),
            submission: Submission::Idle,
            session_id: Uuid::new_v4(),
            phone,
            status_message: String::from("Bem-vindo ao simulador SmartIA!"),
            next_seq: 0,
        }
    }

    pub fn from_config(backend: Arc<dyn SimulateBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.agent, config.phone.clone())
    }

    pub fn is_pending(&self) -> bool {
        self.submission.is_pending()
    }

    /// Start a new transcript session for `agent`.
    pub(crate) fn reset_session(&mut self, agent: Agent) {
        self.agent = agent;
        self.transcript = Transcript::greeting();
        self.state_label = INITIAL_STATE.to_string();
        self.session_id = Uuid::new_v4();
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        self.next_seq += 1;
        Ticket {
            session: self.session_id,
            seq: self.next_seq,
        }
    }
}
