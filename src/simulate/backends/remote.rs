//! HTTP backend for the hosted simulate API.
//!
//! `POST {base_url}/simulate/{agent}` with `{"message", "phone"}` and a JSON
//! `{"reply", "state"}` answer. One attempt per call: no retries and no
//! client-side timeout.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::agent::Agent;
use crate::simulate::{BackendError, SimulateBackend, SimulatePayload, SimulateReply};

pub struct RemoteBackend {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, agent: Agent) -> String {
        format!("{}/simulate/{}", self.base_url, agent.id())
    }
}

#[async_trait]
impl SimulateBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn simulate(
        &self,
        agent: Agent,
        payload: &SimulatePayload,
    ) -> Result<SimulateReply, BackendError> {
        let url = self.endpoint(agent);
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Simulate response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Simulate API error: {} - {}", status.as_u16(), err_body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        serde_json::from_str::<SimulateReply>(&body).map_err(|e| {
            warn!("Unreadable simulate body ({} bytes): {}", body.len(), e);
            BackendError::Parse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_per_agent() {
        let backend = RemoteBackend::new("http://localhost:8080");
        assert_eq!(
            backend.endpoint(Agent::Sdr),
            "http://localhost:8080/simulate/sdr"
        );
        assert_eq!(
            backend.endpoint(Agent::Rfm),
            "http://localhost:8080/simulate/rfm"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = RemoteBackend::new("https://api.example.com//");
        assert_eq!(backend.base_url(), "https://api.example.com");
        assert_eq!(
            backend.endpoint(Agent::Ecom),
            "https://api.example.com/simulate/ecom"
        );
    }
}
