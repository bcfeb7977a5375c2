use std::sync::Arc;

use serde_json::json;
use smartia::Agent;
use smartia::core::action::{Action, Effect, update};
use smartia::core::dispatch;
use smartia::core::message::{DEMO_ERROR, INITIAL_STATE, Origin, REPLY_PLACEHOLDER};
use smartia::core::state::App;
use smartia::simulate::{
    BackendError, LocalBackend, RemoteBackend, SimulateBackend, SimulatePayload,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn payload(message: &str) -> SimulatePayload {
    SimulatePayload {
        message: message.to_string(),
        phone: "demo_user".to_string(),
    }
}

/// Submits `text` through the reducer and runs the resulting request for real.
async fn submit_and_settle(app: &mut App, text: &str) -> Action {
    let Effect::SpawnRequest(request) = update(app, Action::Submit(text.to_string())) else {
        panic!("submit should spawn a request");
    };
    assert!(app.is_pending());
    dispatch::perform(app.backend.as_ref(), request).await
}

fn remote_app(base_url: &str) -> App {
    App::new(
        Arc::new(RemoteBackend::new(base_url)),
        Agent::Sdr,
        "demo_user".to_string(),
    )
}

// ============================================================================
// RemoteBackend Tests
// ============================================================================

#[tokio::test]
async fn test_remote_successful_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/ecom"))
        .and(body_json(json!({"message": "Oi", "phone": "demo_user"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"reply": "Olá! Como posso ajudar?", "state": "greeting"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = RemoteBackend::new(mock_server.uri());
    let reply = backend.simulate(Agent::Ecom, &payload("Oi")).await.unwrap();

    assert_eq!(reply.reply.as_deref(), Some("Olá! Como posso ajudar?"));
    assert_eq!(reply.state.as_deref(), Some("greeting"));
}

#[tokio::test]
async fn test_remote_tolerates_extra_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/rfm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Sentimos sua falta!",
            "state": "reactivation",
            "agent": "rfm",
            "session_id": "demo_user_rfm",
            "latency_ms": 12
        })))
        .mount(&mock_server)
        .await;

    let backend = RemoteBackend::new(mock_server.uri());
    let reply = backend.simulate(Agent::Rfm, &payload("oi")).await.unwrap();

    assert_eq!(reply.agent.as_deref(), Some("rfm"));
    assert_eq!(reply.session_id.as_deref(), Some("demo_user_rfm"));
}

#[tokio::test]
async fn test_remote_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/sdr"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let backend = RemoteBackend::new(mock_server.uri());
    let result = backend.simulate(Agent::Sdr, &payload("oi")).await;

    match result {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remote_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/auto"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let backend = RemoteBackend::new(mock_server.uri());
    let result = backend.simulate(Agent::Auto, &payload("oi")).await;

    assert!(matches!(result, Err(BackendError::Parse(_))));
}

#[tokio::test]
async fn test_remote_unreachable_is_network_error() {
    // Nothing listens on port 1
    let backend = RemoteBackend::new("http://127.0.0.1:1");
    let result = backend.simulate(Agent::Sdr, &payload("oi")).await;

    assert!(matches!(result, Err(BackendError::Network(_))));
}

// ============================================================================
// Full Submission Cycle
// ============================================================================

#[tokio::test]
async fn test_sdr_pricing_question_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/sdr"))
        .and(body_json(json!({"message": "Quero saber o preço", "phone": "demo_user"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"reply": "Nosso plano custa R$ 2.997", "state": "pricing"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = remote_app(&mock_server.uri());
    let action = submit_and_settle(&mut app, "Quero saber o preço").await;
    assert_eq!(update(&mut app, action), Effect::None);

    let messages = app.transcript.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].origin, Origin::User);
    assert_eq!(messages[1].text, "Quero saber o preço");
    assert_eq!(messages[2].origin, Origin::Bot);
    assert_eq!(messages[2].text, "Nosso plano custa R$ 2.997");
    assert_eq!(app.state_label, "pricing");
    assert!(!app.is_pending());
}

#[tokio::test]
async fn test_missing_reply_shows_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/sdr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let mut app = remote_app(&mock_server.uri());
    let action = submit_and_settle(&mut app, "oi").await;
    update(&mut app, action);

    let last = app.transcript.last().unwrap();
    assert_eq!(last.text, REPLY_PLACEHOLDER);
    assert_eq!(app.state_label, INITIAL_STATE);
}

#[tokio::test]
async fn test_failed_request_shows_demo_error_and_keeps_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/sdr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Oi!", "state": "greeting"})))
        .mount(&mock_server)
        .await;

    let mut app = remote_app(&mock_server.uri());
    let action = submit_and_settle(&mut app, "oi").await;
    update(&mut app, action);
    assert_eq!(app.state_label, "greeting");

    // Same app, but the API is gone now
    app.backend = Arc::new(RemoteBackend::new("http://127.0.0.1:1"));
    let action = submit_and_settle(&mut app, "ainda aí?").await;
    assert!(matches!(action, Action::ReplyFailed { .. }));
    update(&mut app, action);

    assert_eq!(app.transcript.last().unwrap().text, DEMO_ERROR);
    assert_eq!(app.state_label, "greeting");
    assert!(!app.is_pending());
}

#[tokio::test]
async fn test_reply_after_agent_switch_is_discarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/simulate/sdr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Resposta SDR", "state": "qualifying"})))
        .mount(&mock_server)
        .await;

    let mut app = remote_app(&mock_server.uri());
    let Effect::SpawnRequest(request) = update(&mut app, Action::Submit("oi".into())) else {
        panic!("submit should spawn a request");
    };

    assert_eq!(update(&mut app, Action::SelectAgent(Agent::Ecom)), Effect::TranscriptReset);
    let action = dispatch::perform(app.backend.as_ref(), request).await;
    update(&mut app, action);

    assert_eq!(app.transcript.messages().len(), 1, "only the fresh greeting remains");
    assert_eq!(app.state_label, INITIAL_STATE);
    assert!(!app.is_pending());
}

// ============================================================================
// LocalBackend
// ============================================================================

#[tokio::test]
async fn test_local_backend_drives_a_conversation() {
    let mut app = App::new(
        Arc::new(LocalBackend::new()),
        Agent::Sdr,
        "demo_user".to_string(),
    );

    let action = submit_and_settle(&mut app, "Olá").await;
    update(&mut app, action);
    let first_state = app.state_label.clone();
    assert_ne!(first_state, INITIAL_STATE);

    let action = submit_and_settle(&mut app, "Quero saber o preço").await;
    update(&mut app, action);

    assert_eq!(app.transcript.messages().len(), 5);
    assert!(app
        .transcript
        .messages()
        .iter()
        .all(|m| m.text != DEMO_ERROR));
}
