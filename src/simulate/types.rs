use serde::{Deserialize, Serialize};

/// JSON body of `POST /simulate/{agent}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulatePayload {
    pub message: String,
    pub phone: String,
}

/// JSON answer of `POST /simulate/{agent}`.
///
/// Every field is optional on the wire; the reducer decides the fallbacks.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SimulateReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
