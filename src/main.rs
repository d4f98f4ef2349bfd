//! Celebration — rotating Slack status loop
//!
//! Entry point. Loads `.env` and configuration, initialises structured
//! logging, then either runs the status loop or performs a one-shot
//! profile read/write.

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use tracing::info;

use celebration::cli::{Cli, Command, ProfileArgs, RunArgs};
use celebration::config::AppConfig;
use celebration::engine::pacer::TokioPacer;
use celebration::engine::runner::{PartyLoop, RunReport, Schedule};
use celebration::logging::init_logging;
use celebration::status::{self, slack::SlackClient};

const BANNER: &str = r#"
   ___     _    _             _   _
  / __|___| |__| |__ _ _ __ _| |_(_)___ _ _
 | (__/ -_) / _| '_ \ '_/ _` |  _| / _ \ ' \
  \___\___|_\__|_.__/_| \__,_|\__|_\___/_||_|

  Celebrate good times, come on!
"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    init_logging("celebration=info");

    let mut cfg = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        None => run(&mut cfg, &RunArgs::default()).await,
        Some(Command::Run(args)) => run(&mut cfg, &args).await,
        Some(Command::Status(args)) => set_once(&cfg, args).await,
        Some(Command::Show) => show(&cfg).await,
    }
}

async fn run(cfg: &mut AppConfig, args: &RunArgs) -> Result<()> {
    args.apply(cfg);
    cfg.validate().context("Invalid configuration")?;

    println!("{BANNER}");
    info!(
        iterations = cfg.party.iterations,
        interval_secs = cfg.party.interval_secs,
        backend = ?cfg.status.backend,
        "Celebration starting up"
    );

    let setter = status::from_config(cfg)?;
    let mut party = PartyLoop::new(
        &cfg.content,
        Schedule::from_config(&cfg.party),
        setter,
        TokioPacer,
    )?;

    let report = party.run().await;
    log_run_report(&report);
    Ok(())
}

fn slack_client(cfg: &AppConfig) -> Result<SlackClient> {
    let token = AppConfig::resolve_env(&cfg.status.slack.token_env)?;
    SlackClient::new(SecretString::new(token), cfg.status.slack.timeout_secs)
}

async fn set_once(cfg: &AppConfig, args: ProfileArgs) -> Result<()> {
    let client = slack_client(cfg)?;
    let status = args.into_status();
    client
        .set_profile(&status)
        .await
        .context("Failed to set status")?;
    info!(status = %status, "Status set");
    Ok(())
}

async fn show(cfg: &AppConfig) -> Result<()> {
    let client = slack_client(cfg)?;
    let status = client
        .get_profile()
        .await
        .context("Failed to read status")?;
    println!("{status}");
    Ok(())
}

/// Log a human-readable run summary.
fn log_run_report(report: &RunReport) {
    info!(
        iterations = report.iterations,
        ok = report.updates_ok,
        failed = report.updates_failed,
        rate_limited = report.rate_limited,
        backoffs = report.backoffs,
        "Run complete"
    );
}
