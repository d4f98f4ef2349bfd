//! Command-line arguments for both binaries.

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, Backend};
use crate::types::Status;

/// Rotate your Slack status through a party playlist.
#[derive(Debug, Parser)]
#[command(name = "celebration", version, about)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, short, global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the status loop (the default).
    Run(RunArgs),
    /// Set the status once through the Slack API.
    Status(ProfileArgs),
    /// Print the current status.
    Show,
}

/// Overrides applied on top of the config file.
#[derive(Debug, Args, Default, Clone)]
pub struct RunArgs {
    #[arg(long)]
    pub iterations: Option<u64>,
    #[arg(long)]
    pub interval_secs: Option<u64>,
    /// command | slack | dry-run
    #[arg(long)]
    pub backend: Option<Backend>,
}

impl RunArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(n) = self.iterations {
            cfg.party.iterations = n;
        }
        if let Some(secs) = self.interval_secs {
            cfg.party.interval_secs = secs;
        }
        if let Some(backend) = self.backend {
            cfg.status.backend = backend;
        }
    }
}

/// Profile status fields, as accepted by `slack_update status`.
#[derive(Debug, Args, Default, Clone)]
pub struct ProfileArgs {
    #[arg(long, short)]
    pub text: Option<String>,
    /// Emoji name, with or without colons.
    #[arg(long, short)]
    pub emoji: Option<String>,
    /// Unix timestamp at which the status clears.
    #[arg(long, short = 'x')]
    pub expiration: Option<i64>,
}

impl ProfileArgs {
    pub fn into_status(self) -> Status {
        Status {
            emoji: self.emoji.map(|e| crate::types::wrap_emoji(&e)),
            text: self.text,
            expiration: self.expiration,
        }
    }
}

/// `slack_update` — the standalone status tool the loop shells out to.
#[derive(Debug, Parser)]
#[command(name = "slack_update", version, about = "Set your Slack profile status")]
pub struct SlackUpdateCli {
    #[command(subcommand)]
    pub command: SlackUpdateCommand,
}

#[derive(Debug, Subcommand)]
pub enum SlackUpdateCommand {
    /// Set the profile status.
    Status(ProfileArgs),
    /// Print the current profile status as JSON.
    Get,
}
