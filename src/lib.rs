//! SmartIA chat simulator library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod core;
pub mod simulate;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::agent::Agent;

/// Where agent replies come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The hosted simulate API over HTTP.
    #[default]
    Remote,
    /// Scripted agents running in-process (offline demo).
    Local,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Remote => "remote",
            BackendKind::Local => "local",
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(BackendKind::Remote),
            "local" => Ok(BackendKind::Local),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}
