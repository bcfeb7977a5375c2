//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.smartia/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::BackendKind;
use crate::core::agent::Agent;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SmartiaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_agent: Option<Agent>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub backend: Option<BackendKind>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE: &str = "https://smartia-api-642830139828.us-central1.run.app";
pub const DEFAULT_PHONE: &str = "demo_user";

pub const ENV_API_BASE: &str = "SMARTIA_API_BASE";
pub const ENV_BACKEND: &str = "SMARTIA_BACKEND";
pub const ENV_AGENT: &str = "SMARTIA_AGENT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub agent: Agent,
    pub api_base: String,
    pub backend: BackendKind,
    pub phone: String,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub agent: Option<Agent>,
    pub api_base: Option<String>,
    pub backend: Option<BackendKind>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.smartia/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".smartia").join("config.toml"))
}

/// Load config from `~/.smartia/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SmartiaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SmartiaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SmartiaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SmartiaConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<SmartiaConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SmartiaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# SmartIA Simulator Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_agent = "sdr"              # "sdr", "ecom", "auto" or "rfm"
# phone = "demo_user"                # user identifier sent with every message

# [api]
# base_url = "https://smartia-api-642830139828.us-central1.run.app"   # Or SMARTIA_API_BASE
# backend = "remote"                 # "remote" (HTTP API) or "local" (offline scripted agents)
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SmartiaConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &SmartiaConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Agent: CLI → env → config → default
    let agent = cli
        .agent
        .or_else(|| parse_env(&env, ENV_AGENT))
        .or(config.general.default_agent)
        .unwrap_or_default();

    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .or_else(|| parse_env(&env, ENV_BACKEND))
        .or(config.api.backend)
        .unwrap_or_default();

    // API base URL: CLI → env → config → default
    let api_base = cli
        .api_base
        .clone()
        .or_else(|| env(ENV_API_BASE).filter(|s| !s.trim().is_empty()))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let phone = config
        .general
        .phone
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());

    ResolvedConfig {
        agent,
        api_base: api_base.trim_end_matches('/').to_string(),
        backend,
        phone,
    }
}

fn parse_env<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let raw = env(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}: {}", key, e);
            None
        }
    }
}
