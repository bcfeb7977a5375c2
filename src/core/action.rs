//! # Actions
//!
//! Everything that can happen in the simulator becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The backend answers? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state and returns an `Effect` describing the I/O the adapter
//! should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! A submission moves through two phases:
//!
//! ```text
//!   Idle ──Submit──▶ Pending(ticket) ──ReplyReceived/ReplyFailed(ticket)──▶ Idle
//! ```
//!
//! Results carry the ticket they were issued with. A result whose ticket
//! belongs to an earlier session (the agent was switched while it was in
//! flight) releases the pending flag but leaves the transcript alone.

use log::{debug, info, warn};

use crate::core::agent::Agent;
use crate::core::message::{DEMO_ERROR, INITIAL_STATE, Message, REPLY_PLACEHOLDER};
use crate::core::state::{App, Submission, Ticket};
use crate::simulate::{SimulatePayload, SimulateReply};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectAgent(Agent),
    Submit(String),
    ReplyReceived { ticket: Ticket, reply: SimulateReply },
    ReplyFailed { ticket: Ticket, error: String },
    Quit,
}

/// A request the adapter must send on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub ticket: Ticket,
    pub agent: Agent,
    pub payload: SimulatePayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The transcript was replaced; views showing it should reset.
    TranscriptReset,
    SpawnRequest(OutboundRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectAgent(agent) => {
            if agent == app.agent {
                return Effect::None;
            }
            if let Submission::Pending(ticket) = app.submission {
                info!(
                    "Switching to {} with request #{} still in flight; its result will be discarded",
                    agent, ticket.seq
                );
            }
            app.reset_session(agent);
            app.status_message = agent.label().to_string();
            info!("Selected agent {} (session {})", agent, app.session_id);
            Effect::TranscriptReset
        }

        Action::Submit(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Effect::None;
            }
            if let Submission::Pending(ticket) = app.submission {
                debug!("Submit ignored: request #{} still pending", ticket.seq);
                return Effect::None;
            }

            app.transcript.push(Message::user(text));
            let ticket = app.issue_ticket();
            app.submission = Submission::Pending(ticket);
            app.status_message = String::from("Digitando...");

            Effect::SpawnRequest(OutboundRequest {
                ticket,
                agent: app.agent,
                payload: SimulatePayload {
                    message: text.to_string(),
                    phone: app.phone.clone(),
                },
            })
        }

        Action::ReplyReceived { ticket, reply } => {
            if !settle(app, ticket) {
                return Effect::None;
            }

            let text = reply
                .reply
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| REPLY_PLACEHOLDER.to_string());
            app.state_label = reply
                .state
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| INITIAL_STATE.to_string());
            app.transcript.push(Message::bot(text, reply.state));
            app.status_message = format!("Estado: {}", app.state_label);
            Effect::None
        }

        Action::ReplyFailed { ticket, error } => {
            if !settle(app, ticket) {
                return Effect::None;
            }

            warn!("Simulate request #{} failed: {}", ticket.seq, error);
            app.transcript.push(Message::bot(DEMO_ERROR, None));
            app.status_message = String::from("Falha ao contatar a API");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Release the pending flag for `ticket`. Returns true when the result
/// belongs to the current session and should be shown.
fn settle(app: &mut App, ticket: Ticket) -> bool {
    match app.submission {
        Submission::Pending(pending) if pending == ticket => {
            app.submission = Submission::Idle;
        }
        other => {
            warn!(
                "Result for request #{} does not match submission {:?}; ignoring",
                ticket.seq, other
            );
            return false;
        }
    }

    if ticket.session != app.session_id {
        info!(
            "Discarding result of request #{} from a previous session",
            ticket.seq
        );
        return false;
    }
    true
}
