//! Dry-run status backend: logs each update and reports success.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use super::StatusSetter;
use crate::types::{Status, StatusError};

#[derive(Debug, Default)]
pub struct DryRunStatusSetter {
    applied: AtomicU64,
}

impl DryRunStatusSetter {
    /// Number of updates "applied" so far.
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StatusSetter for DryRunStatusSetter {
    async fn set_status(&self, status: &Status) -> Result<(), StatusError> {
        let n = self.applied.fetch_add(1, Ordering::Relaxed) + 1;
        info!(n, status = %status, "DRY RUN: would set status");
        Ok(())
    }
}
