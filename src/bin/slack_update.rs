//! slack_update — set or read the Slack profile status.
//!
//! The tool the celebration loop invokes once per iteration. Reads the
//! user token from `SLACK_TOKEN` (a `.env` file is honoured). On failure
//! the error is written to stderr, so a throttled call surfaces the
//! `ratelimited` token to the caller, and the exit code is non-zero.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use secrecy::SecretString;
use tracing::debug;

use celebration::cli::{SlackUpdateCli, SlackUpdateCommand};
use celebration::config::AppConfig;
use celebration::logging::init_logging;
use celebration::status::slack::SlackClient;
use celebration::types::{StatusError, RATE_LIMITED_TOKEN};

const TOKEN_ENV: &str = "SLACK_TOKEN";
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Exit code for a rate-limited call.
const EXIT_RATE_LIMITED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenv::dotenv();
    let cli = SlackUpdateCli::parse();
    init_logging("warn");

    let client = match client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        SlackUpdateCommand::Status(args) => {
            let status = args.into_status();
            debug!(status = %status, "Setting status");
            client.set_profile(&status).await
        }
        SlackUpdateCommand::Get => client.get_profile().await.and_then(|status| {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| StatusError::Decode(e.to_string()))?;
            println!("{json}");
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_rate_limited() {
                eprintln!("{RATE_LIMITED_TOKEN}: {e}");
                ExitCode::from(EXIT_RATE_LIMITED)
            } else {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }
}

fn client() -> Result<SlackClient> {
    let token = AppConfig::resolve_env(TOKEN_ENV)?;
    SlackClient::new(SecretString::new(token), HTTP_TIMEOUT_SECS)
}
