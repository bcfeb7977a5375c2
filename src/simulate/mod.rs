//! # Simulate Backends
//!
//! Everything needed to get an agent reply for one user message:
//! the wire types, the [`SimulateBackend`] trait and its implementations.

pub mod backend;
pub mod backends;
pub mod types;

pub use backend::{BackendError, SimulateBackend};
pub use backends::{LocalBackend, RemoteBackend};
pub use types::{SimulatePayload, SimulateReply};
