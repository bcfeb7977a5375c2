//! # Demo Agents
//!
//! The closed set of personas the simulator can talk to. Each agent has a
//! wire identifier (used in the `/simulate/{agent}` path), a badge shown in
//! the selector and a human-readable label.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// Sales qualification
    #[default]
    Sdr,
    /// E-commerce FAQ
    Ecom,
    /// Self-service scheduling
    Auto,
    /// Customer reactivation
    Rfm,
}

impl Agent {
    /// All agents in selector order.
    pub const ALL: [Agent; 4] = [Agent::Sdr, Agent::Ecom, Agent::Auto, Agent::Rfm];

    pub fn id(self) -> &'static str {
        match self {
            Agent::Sdr => "sdr",
            Agent::Ecom => "ecom",
            Agent::Auto => "auto",
            Agent::Rfm => "rfm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Agent::Sdr => "Agent SDR - Qualificação de leads e vendas",
            Agent::Ecom => "Agent E-commerce - FAQ e vendas online",
            Agent::Auto => "Agent Autoatendimento - Agendamentos e CRM",
            Agent::Rfm => "Agent RFM - Reativação de clientes",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Agent::Sdr => "SDR",
            Agent::Ecom => "ECOM",
            Agent::Auto => "AUTO",
            Agent::Rfm => "RFM",
        }
    }

    /// Position in [`Agent::ALL`].
    pub fn index(self) -> usize {
        match self {
            Agent::Sdr => 0,
            Agent::Ecom => 1,
            Agent::Auto => 2,
            Agent::Rfm => 3,
        }
    }

    /// Cycle forward through the selector, wrapping around.
    pub fn next(self) -> Agent {
        Agent::ALL[(self.index() + 1) % Agent::ALL.len()]
    }

    /// Cycle backward through the selector, wrapping around.
    pub fn prev(self) -> Agent {
        Agent::ALL[(self.index() + Agent::ALL.len() - 1) % Agent::ALL.len()]
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAgent(pub String);

impl fmt::Display for UnknownAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown agent '{}' (expected sdr, ecom, auto or rfm)", self.0)
    }
}

impl std::error::Error for UnknownAgent {}

impl FromStr for Agent {
    type Err = UnknownAgent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Agent::ALL
            .into_iter()
            .find(|agent| agent.id() == wanted)
            .ok_or_else(|| UnknownAgent(s.to_string()))
    }
}
