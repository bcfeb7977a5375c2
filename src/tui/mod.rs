//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and performs the
//! effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a reply is pending): draws every ~80ms so the typing
//!   indicator can pulse.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or
//!   background results.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::BackendKind;
use crate::core::action::{Action, Effect, OutboundRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::dispatch;
use crate::core::state::App;
use crate::simulate::{LocalBackend, RemoteBackend, SimulateBackend};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Animation state
    pub pulse_value: f32,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the backend selected by the resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn SimulateBackend> {
    match config.backend {
        BackendKind::Remote => {
            let remote = RemoteBackend::new(config.api_base.clone());
            info!("Simulate API at {}", remote.base_url());
            Arc::new(remote)
        }
        BackendKind::Local => Arc::new(LocalBackend::new()),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    info!("Using {} backend", backend.name());
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, &event) {
                let effect = update(&mut app, action);
                if !apply_effect(effect, &app, &mut tui, &tx) {
                    break 'main;
                }
            }
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if !apply_effect(effect, &app, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Turn a terminal event into a core action, handling the purely visual ones
/// (scrolling, editing) in place.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::SelectAgent(agent) => Some(Action::SelectAgent(*agent)),
        TuiEvent::NextAgent => Some(Action::SelectAgent(app.agent.next())),
        TuiEvent::PrevAgent => Some(Action::SelectAgent(app.agent.prev())),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            None
        }
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::Submit(text)),
            InputEvent::ContentChanged => None,
        },
    }
}

/// Perform an effect. Returns false when the app should exit.
fn apply_effect(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::TranscriptReset => {
            tui.message_list.reset();
        }
        Effect::SpawnRequest(request) => {
            // A fresh submission always brings the newest message into view
            tui.message_list.stick_to_bottom = true;
            spawn_request(app.backend.clone(), request, tx.clone());
        }
        Effect::Quit => return false,
    }
    // Events later in the same batch must see the new pending state
    tui.input_box.disabled = app.is_pending();
    true
}

fn spawn_request(
    backend: Arc<dyn SimulateBackend>,
    request: OutboundRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning simulate request #{}", request.ticket.seq);
    tokio::spawn(async move {
        let seq = request.ticket.seq;
        let action = dispatch::perform(backend.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver result of request #{}: receiver dropped", seq);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Agent;
    use crate::test_support::test_app;

    #[test]
    fn test_build_backend_follows_config() {
        let mut config = ResolvedConfig {
            agent: Agent::Sdr,
            api_base: "http://localhost:8080".to_string(),
            backend: BackendKind::Remote,
            phone: "demo_user".to_string(),
        };
        assert_eq!(build_backend(&config).name(), RemoteBackend::new("x").name());

        config.backend = BackendKind::Local;
        assert_eq!(build_backend(&config).name(), LocalBackend::new().name());
    }

    #[test]
    fn test_route_agent_keys() {
        let app = test_app();
        let mut tui = TuiState::new();

        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::SelectAgent(Agent::Rfm)),
            Some(Action::SelectAgent(Agent::Rfm))
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::NextAgent),
            Some(Action::SelectAgent(Agent::Ecom))
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::PrevAgent),
            Some(Action::SelectAgent(Agent::Rfm))
        );
    }

    #[test]
    fn test_route_typing_then_enter_submits() {
        let app = test_app();
        let mut tui = TuiState::new();

        for c in "oi".chars() {
            assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar(c)), None);
        }
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::Submit("oi".to_string()))
        );
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_route_scroll_stays_in_tui() {
        let app = test_app();
        let mut tui = TuiState::new();

        assert_eq!(route_event(&app, &mut tui, &TuiEvent::ScrollUp), None);
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn test_transcript_reset_resets_scroll_and_quit_stops() {
        let app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        tui.message_list.stick_to_bottom = false;
        assert!(apply_effect(Effect::TranscriptReset, &app, &mut tui, &tx));
        assert!(tui.message_list.stick_to_bottom);

        assert!(!apply_effect(Effect::Quit, &app, &mut tui, &tx));
    }

    #[tokio::test]
    async fn test_input_locks_within_the_same_event_batch() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        // "oi" Enter "preco" Enter, all drained before the next redraw
        let mut batch: Vec<TuiEvent> = "oi".chars().map(TuiEvent::InputChar).collect();
        batch.push(TuiEvent::Submit);
        batch.extend("preco".chars().map(TuiEvent::InputChar));
        batch.push(TuiEvent::Submit);

        let mut submitted = Vec::new();
        for event in &batch {
            if let Some(action) = route_event(&app, &mut tui, event) {
                if let Action::Submit(text) = &action {
                    submitted.push(text.clone());
                }
                let effect = update(&mut app, action);
                assert!(apply_effect(effect, &app, &mut tui, &tx));
            }
        }

        assert_eq!(submitted, vec!["oi".to_string()]);
        assert_eq!(app.transcript.messages().len(), 2);
        assert!(tui.input_box.disabled);
    }

    #[tokio::test]
    async fn test_input_unlocks_when_reply_settles() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        let effect = update(&mut app, Action::Submit("oi".into()));
        let Effect::SpawnRequest(request) = effect.clone() else {
            panic!("expected a request");
        };
        apply_effect(effect, &app, &mut tui, &tx);
        assert!(tui.input_box.disabled);

        let effect = update(
            &mut app,
            Action::ReplyFailed {
                ticket: request.ticket,
                error: "offline".into(),
            },
        );
        apply_effect(effect, &app, &mut tui, &tx);
        assert!(!tui.input_box.disabled);
    }

    #[tokio::test]
    async fn test_spawned_request_reports_back() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();

        let Effect::SpawnRequest(request) = update(&mut app, Action::Submit("oi".into())) else {
            panic!("expected a request");
        };
        let ticket = request.ticket;
        spawn_request(app.backend.clone(), request, tx);

        // The scripted backend has no outcomes queued, so the call fails
        let action = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        assert!(matches!(action, Action::ReplyFailed { ticket: t, .. } if t == ticket));
    }
}
