//! External command status backend.
//!
//! Runs `<program> [args..] status -e :emoji: -t "text" [-x expiration]`
//! once per update and waits for it to exit. A non-zero exit is a
//! failure; if the command's output mentions `ratelimited` the failure
//! is reported as rate limited so the loop can back off.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use super::StatusSetter;
use crate::config::CommandConfig;
use crate::types::{Status, StatusError, RATE_LIMITED_TOKEN};

/// Status setter that shells out to an external tool.
#[derive(Debug, Clone)]
pub struct CommandStatusSetter {
    program: String,
    leading_args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandStatusSetter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    pub fn from_config(cfg: &CommandConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            leading_args: cfg.args.clone(),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one update, leading args included.
    pub fn args_for(&self, status: &Status) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend(status_args(status));
        args
    }
}

/// The `status` subcommand arguments for one update.
///
/// The text is wrapped in literal double quotes; the status tool has
/// always received it that way.
pub fn status_args(status: &Status) -> Vec<String> {
    let mut args = vec!["status".to_string()];
    if let Some(emoji) = &status.emoji {
        args.push("-e".to_string());
        args.push(emoji.clone());
    }
    if let Some(text) = &status.text {
        args.push("-t".to_string());
        args.push(format!("\"{text}\""));
    }
    if let Some(exp) = status.expiration {
        args.push("-x".to_string());
        args.push(exp.to_string());
    }
    args
}

/// Turn a failed exit into a `StatusError`.
pub fn classify_exit(program: &str, code: Option<i32>, stdout: &str, stderr: &str) -> StatusError {
    let output = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };

    if stderr.contains(RATE_LIMITED_TOKEN) || stdout.contains(RATE_LIMITED_TOKEN) {
        return StatusError::RateLimited {
            backend: program.to_string(),
            detail: output,
        };
    }

    StatusError::Exit { code, output }
}

#[async_trait]
impl StatusSetter for CommandStatusSetter {
    async fn set_status(&self, status: &Status) -> Result<(), StatusError> {
        let args = self.args_for(status);
        debug!(program = %self.program, args = ?args, "Running status command");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let run = cmd.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(StatusError::Timeout {
                        secs: limit.as_secs(),
                    })
                }
            },
            None => run.await,
        }
        .map_err(|source| StatusError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_exit(&self.program, output.status.code(), &stdout, &stderr))
    }
}
