//! Runs an [`OutboundRequest`] against a backend and turns the outcome into
//! the action that settles it. This is the submission boundary: every
//! backend error stops here and becomes `Action::ReplyFailed`.

use log::{debug, info, warn};

use crate::core::action::{Action, OutboundRequest};
use crate::simulate::SimulateBackend;

pub async fn perform(backend: &dyn SimulateBackend, request: OutboundRequest) -> Action {
    let OutboundRequest {
        ticket,
        agent,
        payload,
    } = request;

    info!(
        "Request #{} -> {} backend, agent={}, {} chars",
        ticket.seq,
        backend.name(),
        agent,
        payload.message.chars().count()
    );

    match backend.simulate(agent, &payload).await {
        Ok(reply) => {
            debug!(
                "Request #{} answered: state={:?}, reply_len={}",
                ticket.seq,
                reply.state,
                reply.reply.as_deref().map_or(0, str::len)
            );
            Action::ReplyReceived { ticket, reply }
        }
        Err(e) => {
            warn!("Request #{} failed: {}", ticket.seq, e);
            Action::ReplyFailed {
                ticket,
                error: e.to_string(),
            }
        }
    }
}
