//! Observability snapshot of a watcher.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::WatchError;

/// Whether a watcher currently has a fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchPhase {
    Idle,
    Fetching,
}

/// Point-in-time view of a watcher's bookkeeping.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchStatus {
    pub name: String,
    pub phase: WatchPhase,
    /// Number of items in the current snapshot
    pub resources: usize,
    pub poll_interval_ms: u64,
    /// Time of the last successful fetch
    pub last_fetch: Option<DateTime<Utc>>,
    /// Cause of the last failed fetch, cleared by the next success
    #[serde(serialize_with = "serialize_error")]
    pub last_error: Option<WatchError>,
    pub last_error_at: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    /// Completed fetches, successful or not
    pub fetches: u64,
    /// Ticks dropped because a fetch was still in flight
    pub skipped_ticks: u64,
    /// Ticks dropped by the failure backoff
    pub backed_off_ticks: u64,
}

impl WatchStatus {
    /// True once at least one fetch has succeeded.
    pub fn has_synced(&self) -> bool {
        self.last_fetch.is_some()
    }
}

fn serialize_error<S: Serializer>(error: &Option<WatchError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
