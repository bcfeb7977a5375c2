use std::fmt;

use async_trait::async_trait;

use super::types::{SimulatePayload, SimulateReply};
use crate::core::agent::Agent;

/// Errors that can occur while asking a backend for a reply.
/// The chat shows all of them the same way; the variants exist for the log.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be read as a simulate reply.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait SimulateBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Sends one user message to `agent` and returns its reply.
    async fn simulate(
        &self,
        agent: Agent,
        payload: &SimulatePayload,
    ) -> Result<SimulateReply, BackendError>;
}
