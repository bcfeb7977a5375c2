//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::agent::Agent;
use crate::core::state::App;
use crate::simulate::{BackendError, SimulateBackend, SimulatePayload, SimulateReply};

/// A backend for tests that don't need real API calls.
/// Hands out pre-recorded outcomes in order and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<Result<SimulateReply, BackendError>>>,
    calls: Mutex<Vec<(Agent, SimulatePayload)>>,
}

impl ScriptedBackend {
    pub fn new(outcomes: Vec<Result<SimulateReply, BackendError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Agent, SimulatePayload)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SimulateBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn simulate(
        &self,
        agent: Agent,
        payload: &SimulatePayload,
    ) -> Result<SimulateReply, BackendError> {
        self.calls.lock().unwrap().push((agent, payload.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Network("no scripted outcome".to_string())))
    }
}

/// Creates a test App (agent `sdr`, phone `demo_user`) with an empty ScriptedBackend.
pub fn test_app() -> App {
    App::new(
        Arc::new(ScriptedBackend::default()),
        Agent::Sdr,
        "demo_user".to_string(),
    )
}
