//! # TUI Components
//!
//! UI pieces of the chat screen.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Rebuilt every frame from the data they show:
//! - `AgentBar`: selected agent, the agent badges and the reported state
//! - `Bubble`: one chat message, or the typing indicator
//! - `StatusBar`: backend name and status line
//!
//! ## Stateful Components (Event-Driven)
//!
//! Keep local state between frames and react to `TuiEvent`s:
//! - `InputBox`: single-line message field
//! - `MessageList`: scrollable transcript with a height cache
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── agent_bar.rs     (header)
//! ├── message.rs       (chat bubble)
//! ├── message_list.rs  (scrollable transcript)
//! ├── status_bar.rs    (bottom line)
//! └── input_box/       (text input)
//! ```

mod agent_bar;
pub use agent_bar::AgentBar;

mod status_bar;
pub use status_bar::StatusBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
