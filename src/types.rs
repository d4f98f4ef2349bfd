//! Shared types for the celebration loop.
//!
//! The status payload and the error taxonomy used by every backend.
//! Kept free of backend details so the engine and the status setters
//! can both depend on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token the status tool and the Slack API use to signal throttling.
pub const RATE_LIMITED_TOKEN: &str = "ratelimited";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// One profile status update.
///
/// Field names on the wire follow the Slack `users.profile.*` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Status {
    /// Emoji in `:name:` form.
    #[serde(rename = "status_emoji", skip_serializing_if = "Option::is_none", default)]
    pub emoji: Option<String>,
    #[serde(rename = "status_text", skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    /// Unix timestamp (seconds) after which Slack clears the status.
    #[serde(rename = "status_expiration", skip_serializing_if = "Option::is_none", default)]
    pub expiration: Option<i64>,
}

impl Status {
    /// Build a status from a bare emoji name and a text line.
    pub fn from_pair(emoji: &str, text: &str) -> Self {
        Self {
            emoji: Some(wrap_emoji(emoji)),
            text: Some(text.to_string()),
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: Option<i64>) -> Self {
        self.expiration = expiration;
        self
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.emoji.as_deref().unwrap_or("-"),
            self.text.as_deref().unwrap_or(""),
        )?;
        if let Some(exp) = self.expiration {
            write!(f, " (expires {exp})")?;
        }
        Ok(())
    }
}

/// Wrap an emoji name in colons unless it already is.
pub fn wrap_emoji(name: &str) -> String {
    if name.len() >= 2 && name.starts_with(':') && name.ends_with(':') {
        name.to_string()
    } else {
        format!(":{name}:")
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single status update.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("Rate limited by {backend}: {detail}")]
    RateLimited { backend: String, detail: String },

    #[error("Status command exited with code {code:?}: {output}")]
    Exit { code: Option<i32>, output: String },

    #[error("Failed to start status command {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Status command timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl StatusError {
    /// Whether this failure should trigger the extended backoff.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, StatusError::RateLimited { .. })
    }
}

/// Invalid configuration detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Sequence `{0}` is empty")]
    EmptySequence(String),

    #[error("Unknown status backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
