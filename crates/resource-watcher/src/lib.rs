//! Resource Watcher
//!
//! Keeps an in-memory, always-readable snapshot of a remote resource list,
//! refreshed on a fixed interval in the background.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use resource_watcher::{ResourceWatcher, WatcherConfig};
//!
//! # async fn example() {
//! let watcher = ResourceWatcher::spawn(
//!     "services",
//!     || async { Ok::<_, String>(vec!["odh-dashboard".to_string()]) },
//!     WatcherConfig::new(Duration::from_secs(30)),
//! );
//!
//! // Empty until the first fetch completes
//! let services = watcher.get_resources();
//! println!("{} services", services.len());
//! # }
//! ```

pub mod backoff;
pub mod error;
pub mod status;
pub mod ticker;
pub mod watcher;

pub use backoff::{FailurePolicy, FibonacciBackoff};
pub use error::WatchError;
pub use status::{WatchPhase, WatchStatus};
pub use ticker::{IntervalTicker, ManualTicker, TickHandle, Ticker, manual_ticker};
pub use watcher::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_POLL_INTERVAL, RefreshOutcome, ResourceWatcher, WatchedResource, WatcherConfig,
};
