//! # Transcript
//!
//! Messages exchanged with the current agent. A transcript only grows;
//! switching agents throws it away and starts a new one from the greeting.

use chrono::{DateTime, Local};

/// First bot message of every transcript.
pub const GREETING: &str = "Olá! Eu sou seu agente inteligente. Como posso ajudar?";
/// Shown when a reply arrives without text.
pub const REPLY_PLACEHOLDER: &str = "...";
/// Shown when the simulate call fails for any reason.
pub const DEMO_ERROR: &str = "[erro de demo]: verifique se a API está rodando";
/// State label before any exchange, and when a reply carries none.
pub const INITIAL_STATE: &str = "initial";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
    pub sent_at: DateTime<Local>,
    /// State label the backend reported alongside this reply, if any.
    pub reported_state: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
            sent_at: Local::now(),
            reported_state: None,
        }
    }

    pub fn bot(text: impl Into<String>, reported_state: Option<String>) -> Self {
        Self {
            origin: Origin::Bot,
            text: text.into(),
            sent_at: Local::now(),
            reported_state,
        }
    }

    /// Wall-clock time shown under the bubble.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M:%S").to_string()
    }
}

/// Append-only message list for one agent session.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::greeting()
    }
}

impl Transcript {
    /// A fresh transcript holding only the greeting.
    pub fn greeting() -> Self {
        Self {
            messages: vec![Message::bot(GREETING, None)],
        }
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
