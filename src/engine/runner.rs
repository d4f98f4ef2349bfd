//! The party loop.
//!
//! Runs a fixed number of iterations. Each one pauses for the interval,
//! advances both pickers and applies the resulting status. Failures are
//! logged and swallowed; a rate-limited failure adds one extended pause
//! of `backoff_multiplier × interval` before the next iteration.

use chrono::Utc;
use std::time::Duration;
use tracing::{error, info, warn};

use super::pacer::{Pacer, PauseKind};
use super::picker::CyclicPicker;
use crate::config::PartyConfig;
use crate::content::Content;
use crate::status::StatusSetter;
use crate::types::{ConfigError, Status};

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Loop pacing, resolved from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub iterations: u64,
    pub interval: Duration,
    pub backoff_multiplier: u32,
    pub status_ttl: Option<Duration>,
}

impl Schedule {
    pub fn from_config(cfg: &PartyConfig) -> Self {
        Self {
            iterations: cfg.iterations,
            interval: cfg.interval(),
            backoff_multiplier: cfg.backoff_multiplier,
            status_ttl: cfg.status_ttl_secs.map(Duration::from_secs),
        }
    }

    /// Extra pause taken after a rate-limited update.
    pub fn backoff(&self) -> Duration {
        self.interval * self.backoff_multiplier
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_config(&PartyConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub iterations: u64,
    pub updates_ok: u64,
    pub updates_failed: u64,
    /// Failures classified as rate limited (a subset of `updates_failed`).
    pub rate_limited: u64,
    pub backoffs: u64,
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

pub struct PartyLoop<S, P> {
    setter: S,
    pacer: P,
    emojis: CyclicPicker<String>,
    lines: CyclicPicker<String>,
    schedule: Schedule,
}

impl<S: StatusSetter, P: Pacer> PartyLoop<S, P> {
    pub fn new(
        content: &Content,
        schedule: Schedule,
        setter: S,
        pacer: P,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            setter,
            pacer,
            emojis: CyclicPicker::new("emojis", content.emojis.clone())?,
            lines: CyclicPicker::new("lines", content.lines.clone())?,
            schedule,
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Advance both pickers and build the next status.
    pub fn next_status(&mut self) -> Status {
        let emoji = self.emojis.advance().clone();
        let line = self.lines.advance().clone();
        let expiration = self
            .schedule
            .status_ttl
            .map(|ttl| Utc::now().timestamp() + ttl.as_secs() as i64);
        Status::from_pair(&emoji, &line).with_expiration(expiration)
    }

    /// Run every iteration and return what happened.
    pub async fn run(&mut self) -> RunReport {
        let mut report = RunReport::default();

        info!(
            iterations = self.schedule.iterations,
            interval_secs = self.schedule.interval.as_secs(),
            emojis = self.emojis.len(),
            lines = self.lines.len(),
            "Party started"
        );

        for iteration in 1..=self.schedule.iterations {
            self.pacer.pause(PauseKind::Interval, self.schedule.interval).await;

            let status = self.next_status();
            report.iterations += 1;

            match self.setter.set_status(&status).await {
                Ok(()) => {
                    report.updates_ok += 1;
                    info!(iteration, status = %status, "Status updated");
                }
                Err(e) => {
                    report.updates_failed += 1;
                    error!(iteration, error = %e, "Status update failed");

                    if e.is_rate_limited() {
                        report.rate_limited += 1;
                        let backoff = self.schedule.backoff();
                        warn!(iteration, backoff_secs = backoff.as_secs(), "Rate limited, backing off");
                        self.pacer.pause(PauseKind::Backoff, backoff).await;
                        report.backoffs += 1;
                    }
                }
            }
        }

        info!(
            iterations = report.iterations,
            ok = report.updates_ok,
            failed = report.updates_failed,
            rate_limited = report.rate_limited,
            "Party over"
        );

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
