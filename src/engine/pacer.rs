//! Sleep abstraction for the main loop.
//!
//! The loop never sleeps directly; it asks a `Pacer`, so tests can
//! record pauses instead of waiting them out.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Why the loop is pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    /// The regular wait before each update.
    Interval,
    /// The extra wait after a rate-limited update.
    Backoff,
}

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, kind: PauseKind, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, kind: PauseKind, duration: Duration) {
        debug!(kind = ?kind, secs = duration.as_secs_f64(), "Pausing");
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
