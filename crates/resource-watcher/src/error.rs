//! Watcher errors

use std::time::Duration;

use thiserror::Error;

/// Why the most recent fetch of a watcher failed.
///
/// These never reach readers of the snapshot; they are recorded in
/// [`WatchStatus::last_error`](crate::WatchStatus) for observability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// The fetch function returned an error
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The fetch function did not complete within the configured timeout
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}
