//! Status backends.
//!
//! Defines the `StatusSetter` trait and provides implementations for:
//! - Command — shells out to an external status tool (`slack_update`)
//! - Slack — calls `users.profile.set` directly
//! - Dry-run — logs the update and succeeds

pub mod command;
pub mod dry_run;
pub mod slack;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use tracing::info;

use crate::config::{AppConfig, Backend};
use crate::types::{Status, StatusError};

use command::CommandStatusSetter;
use dry_run::DryRunStatusSetter;
use slack::SlackClient;

/// Abstraction over anything that can apply a profile status.
///
/// Implementors report rate limiting as `StatusError::RateLimited`;
/// every other failure kind is treated alike by the loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSetter: Send + Sync {
    /// Apply one status update.
    async fn set_status(&self, status: &Status) -> Result<(), StatusError>;
}

#[async_trait]
impl<T: StatusSetter + ?Sized> StatusSetter for Box<T> {
    async fn set_status(&self, status: &Status) -> Result<(), StatusError> {
        (**self).set_status(status).await
    }
}

/// Build the backend selected in the config.
pub fn from_config(cfg: &AppConfig) -> Result<Box<dyn StatusSetter>> {
    let setter: Box<dyn StatusSetter> = match cfg.status.backend {
        Backend::Command => {
            info!(
                program = %cfg.status.command.program,
                timeout_secs = ?cfg.status.command.timeout_secs,
                "Using command status backend"
            );
            Box::new(CommandStatusSetter::from_config(&cfg.status.command))
        }
        Backend::Slack => {
            let token = AppConfig::resolve_env(&cfg.status.slack.token_env)?;
            info!(token_env = %cfg.status.slack.token_env, "Using Slack API status backend");
            Box::new(SlackClient::new(
                SecretString::new(token),
                cfg.status.slack.timeout_secs,
            )?)
        }
        Backend::DryRun => {
            info!("Using dry-run status backend");
            Box::new(DryRunStatusSetter::default())
        }
    };
    Ok(setter)
}
