//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a partial file (or none at all) is
//! fine. Secrets (the Slack token) are referenced by env-var name in the
//! config and resolved at runtime via `std::env::var`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::content::Content;
use crate::types::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub party: PartyConfig,
    pub status: StatusConfig,
    pub content: Content,
}

/// Loop pacing.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PartyConfig {
    pub iterations: u64,
    pub interval_secs: u64,
    /// Extra sleep after a rate-limited update, as a multiple of the interval.
    pub backoff_multiplier: u32,
    /// When set, each status expires this many seconds after it is sent.
    pub status_ttl_secs: Option<u64>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            interval_secs: 10,
            backoff_multiplier: 2,
            status_ttl_secs: None,
        }
    }
}

impl PartyConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Which backend applies each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Shell out to an external status tool.
    #[default]
    Command,
    /// Call the Slack Web API in-process.
    Slack,
    /// Log only.
    DryRun,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "command" => Ok(Backend::Command),
            "slack" => Ok(Backend::Slack),
            "dry-run" | "dryrun" | "dry_run" => Ok(Backend::DryRun),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StatusConfig {
    pub backend: Backend,
    pub command: CommandConfig,
    pub slack: SlackConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommandConfig {
    pub program: String,
    /// Arguments placed before the `status` subcommand.
    pub args: Vec<String>,
    /// Kill the command if it runs longer than this. Unbounded when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: "slack_update".to_string(),
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SlackConfig {
    /// Name of the environment variable holding the user token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token_env: "SLACK_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use built-in defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content.validate()?;
        if self.status.backend == Backend::Command && self.status.command.program.trim().is_empty() {
            return Err(ConfigError::Invalid("status.command.program is empty".into()));
        }
        if self.status.command.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("status.command.timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}
