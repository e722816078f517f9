//! Periodically refreshed snapshot cache.
//!
//! A [`ResourceWatcher`] owns one logical resource list. A background task
//! fires the fetch function on every tick; readers only ever see the last
//! complete, successful result.
//!
//! Each watcher is either Idle or Fetching. A tick that arrives while a fetch
//! is still in flight is dropped, not queued, so at most one fetch per
//! watcher runs at any time and results are applied in issue order. Failed or
//! timed-out fetches leave the snapshot untouched and are recorded in the
//! watcher's [`WatchStatus`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backoff::{FailurePolicy, FibonacciBackoff};
use crate::error::WatchError;
use crate::status::{WatchPhase, WatchStatus};
use crate::ticker::{IntervalTicker, Ticker};

/// Default refresh period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Default upper bound on a single fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

type FetchFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, String>> + Send + Sync>;

/// Refresh settings of a single watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Time between ticks; the first tick fires immediately
    pub poll_interval: Duration,
    /// `None` lets a fetch run forever, stalling the watcher while it does
    pub fetch_timeout: Option<Duration>,
    /// What happens to the following ticks after a failed fetch
    pub failure_policy: FailurePolicy,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            failure_policy: FailurePolicy::NextTick,
        }
    }
}

impl WatcherConfig {
    /// Default timeout and failure policy with the given poll interval.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..Self::default()
        }
    }

    /// Replaces the per-fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Option<Duration>) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Replaces the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

/// Result of a single [`ResourceWatcher::refresh`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced with this many items
    Updated(usize),
    /// Fetch failed; snapshot kept
    Failed(WatchError),
    /// Another fetch was in flight
    Skipped,
    /// Still inside the failure backoff window
    BackedOff,
    /// Watcher shut down while fetching
    Cancelled,
}

#[derive(Debug, Default)]
struct WatchState {
    last_fetch: Option<DateTime<Utc>>,
    last_error: Option<WatchError>,
    last_error_at: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    fetches: u64,
    skipped_ticks: u64,
    backed_off_ticks: u64,
    backoff: Option<FibonacciBackoff>,
    retry_after: Option<Instant>,
}

/// Holds the Fetching flag; releasing it (including on cancellation) returns the watcher to Idle.
struct FetchGuard<'a>(&'a AtomicBool);

impl<'a> FetchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Shared<T> {
    name: String,
    config: WatcherConfig,
    fetch: FetchFn<T>,
    snapshot: ArcSwap<Vec<T>>,
    fetching: AtomicBool,
    state: Mutex<WatchState>,
    generation: watch::Sender<u64>,
    shutdown: CancellationToken,
}

impl<T: Send + Sync + 'static> Shared<T> {
    fn state(&self) -> MutexGuard<'_, WatchState> {
        // Bookkeeping stays usable even if a panicking thread held the lock
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_once(&self) -> Result<Vec<T>, WatchError> {
        let fetch = (self.fetch)();
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_elapsed| WatchError::Timeout(limit))?
                .map_err(WatchError::Fetch),
            None => fetch.await.map_err(WatchError::Fetch),
        }
    }

    async fn refresh(&self) -> RefreshOutcome {
        let Some(guard) = FetchGuard::acquire(&self.fetching) else {
            self.state().skipped_ticks += 1;
            debug!("{} fetch still in flight, skipping tick", self.name);
            return RefreshOutcome::Skipped;
        };

        let retry_after = self.state().retry_after;
        if retry_after.is_some_and(|at| Instant::now() < at) {
            self.state().backed_off_ticks += 1;
            debug!("{} backing off after failed fetch, skipping tick", self.name);
            return RefreshOutcome::BackedOff;
        }

        let result = tokio::select! {
            biased;
            () = self.shutdown.cancelled() => return RefreshOutcome::Cancelled,
            result = self.fetch_once() => result,
        };

        let outcome = match result {
            Ok(items) => {
                let count = items.len();
                self.snapshot.store(Arc::new(items));

                let mut state = self.state();
                state.last_fetch = Some(Utc::now());
                state.last_error = None;
                state.last_error_at = None;
                state.consecutive_failures = 0;
                state.fetches += 1;
                state.retry_after = None;
                if let Some(backoff) = state.backoff.as_mut() {
                    backoff.reset();
                }
                debug!("{} snapshot updated with {} items", self.name, count);
                RefreshOutcome::Updated(count)
            }
            Err(error) => {
                let kept = self.snapshot.load().len();
                warn!("{} {}; keeping previous snapshot of {} items", self.name, error, kept);

                let mut state = self.state();
                state.last_error = Some(error.clone());
                state.last_error_at = Some(Utc::now());
                state.consecutive_failures += 1;
                state.fetches += 1;
                if let Some(backoff) = state.backoff.as_mut() {
                    let delay = backoff.next_backoff();
                    state.retry_after = Some(Instant::now() + delay);
                    debug!("{} next fetch not before {:?}", self.name, delay);
                }
                RefreshOutcome::Failed(error)
            }
        };

        drop(guard);
        self.generation.send_modify(|generation| *generation += 1);
        outcome
    }
}

async fn run<T, K>(shared: Arc<Shared<T>>, mut ticker: K)
where
    T: Send + Sync + 'static,
    K: Ticker,
{
    info!(
        "Starting {} watcher (poll interval {:?}, fetch timeout {:?})",
        shared.name, shared.config.poll_interval, shared.config.fetch_timeout
    );

    loop {
        tokio::select! {
            () = shared.shutdown.cancelled() => break,
            tick = ticker.tick() => {
                if tick.is_none() {
                    break;
                }
                // Refresh runs on its own task so the tick cadence does not depend on fetch duration
                let shared = Arc::clone(&shared);
                tokio::spawn(async move {
                    shared.refresh().await;
                });
            }
        }
    }

    info!("Stopped {} watcher", shared.name);
}

/// Background-refreshed snapshot of one resource list.
///
/// Must be created inside a Tokio runtime. Dropping the watcher stops its
/// background task.
pub struct ResourceWatcher<T> {
    shared: Arc<Shared<T>>,
    task: JoinHandle<()>,
}

impl<T> std::fmt::Debug for ResourceWatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceWatcher")
            .field("name", &self.shared.name)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> ResourceWatcher<T> {
    /// Starts a watcher ticking every `config.poll_interval`, with an immediate first fetch.
    pub fn spawn<F, Fut, E>(name: impl Into<String>, fetch: F, config: WatcherConfig) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let ticker = IntervalTicker::new(config.poll_interval);
        Self::spawn_with_ticker(name, fetch, config, ticker)
    }

    /// Starts a watcher driven by an arbitrary tick source.
    pub fn spawn_with_ticker<F, Fut, E, K>(
        name: impl Into<String>,
        fetch: F,
        config: WatcherConfig,
        ticker: K,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
        K: Ticker,
    {
        let fetch: FetchFn<T> = Box::new(move || {
            let fut = fetch();
            Box::pin(async move { fut.await.map_err(|e| e.to_string()) })
        });

        let state = WatchState {
            backoff: config.failure_policy.backoff(),
            ..WatchState::default()
        };

        let shared = Arc::new(Shared {
            name: name.into(),
            config,
            fetch,
            snapshot: ArcSwap::from_pointee(Vec::new()),
            fetching: AtomicBool::new(false),
            state: Mutex::new(state),
            generation: watch::Sender::new(0),
            shutdown: CancellationToken::new(),
        });

        let task = tokio::spawn(run(Arc::clone(&shared), ticker));
        Self { shared, task }
    }

    /// Name used in logs and in [`WatchStatus::name`].
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Last successful snapshot, empty until the first fetch succeeds.
    ///
    /// Never blocks on or triggers a fetch.
    pub fn get_resources(&self) -> Arc<Vec<T>> {
        self.shared.snapshot.load_full()
    }

    /// Runs one refresh now, subject to the same Idle/Fetching guard as ticks.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.shared.refresh().await
    }

    /// Receiver whose value increments after every completed fetch.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.generation.subscribe()
    }

    /// Point-in-time view of the phase, snapshot size and fetch history.
    pub fn status(&self) -> WatchStatus {
        let resources = self.shared.snapshot.load().len();
        let phase = if self.shared.fetching.load(Ordering::Acquire) {
            WatchPhase::Fetching
        } else {
            WatchPhase::Idle
        };
        let state = self.shared.state();
        WatchStatus {
            name: self.shared.name.clone(),
            phase,
            resources,
            poll_interval_ms: u64::try_from(self.shared.config.poll_interval.as_millis()).unwrap_or(u64::MAX),
            last_fetch: state.last_fetch,
            last_error: state.last_error.clone(),
            last_error_at: state.last_error_at,
            consecutive_failures: state.consecutive_failures,
            fetches: state.fetches,
            skipped_ticks: state.skipped_ticks,
            backed_off_ticks: state.backed_off_ticks,
        }
    }

    /// Stops ticking and cancels any fetch in flight. The snapshot stays readable.
    pub fn shutdown(&self) {
        self.shared.shutdown.cancel();
    }

    /// False once the tick loop has exited, after shutdown or when its ticker ends.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl<T> Drop for ResourceWatcher<T> {
    fn drop(&mut self) {
        self.shared.shutdown.cancel();
    }
}

/// Type-erased view of a watcher, for listing heterogeneous watchers together.
pub trait WatchedResource: Send + Sync {
    fn name(&self) -> &str;
    fn status(&self) -> WatchStatus;
}

impl<T: Send + Sync + 'static> WatchedResource for ResourceWatcher<T> {
    fn name(&self) -> &str {
        ResourceWatcher::name(self)
    }

    fn status(&self) -> WatchStatus {
        ResourceWatcher::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::manual_ticker;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
    }

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&id| Item { id }).collect()
    }

    /// Fetch that succeeds with `[{id:1}]` on the first call and fails afterwards.
    fn succeed_then_fail(calls: Arc<AtomicUsize>) -> impl Fn() -> BoxFuture<'static, Result<Vec<Item>, String>> + Send + Sync {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if n == 0 {
                    Ok(items(&[1]))
                } else {
                    Err("connection refused".to_string())
                }
            })
        }
    }

    #[tokio::test]
    async fn test_cold_read_is_empty() {
        let (_handle, ticker) = manual_ticker();
        let watcher = ResourceWatcher::spawn_with_ticker(
            "items",
            || async { Ok::<_, String>(items(&[1, 2])) },
            WatcherConfig::default(),
            ticker,
        );

        assert!(watcher.get_resources().is_empty());
        let status = watcher.status();
        assert_eq!(status.phase, WatchPhase::Idle);
        assert!(!status.has_synced());
        assert_eq!(status.fetches, 0);
    }

    #[tokio::test]
    async fn test_successful_fetch_is_visible_in_order_to_concurrent_readers() {
        let (handle, ticker) = manual_ticker();
        let watcher = Arc::new(ResourceWatcher::spawn_with_ticker(
            "items",
            || async { Ok::<_, String>(items(&[3, 1, 2])) },
            WatcherConfig::default(),
            ticker,
        ));
        let mut generation = watcher.subscribe();

        handle.tick();
        generation.changed().await.unwrap();

        let readers: Vec<_> = (0..16)
            .map(|_| {
                let watcher = Arc::clone(&watcher);
                tokio::spawn(async move { watcher.get_resources() })
            })
            .collect();
        for reader in readers {
            assert_eq!(*reader.await.unwrap(), items(&[3, 1, 2]));
        }

        let status = watcher.status();
        assert!(status.has_synced());
        assert_eq!(status.resources, 3);
        assert_eq!(status.last_error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_never_overlaps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));

        let fetch = {
            let calls = Arc::clone(&calls);
            let in_flight = Arc::clone(&in_flight);
            let max_in_flight = Arc::clone(&max_in_flight);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                let in_flight = Arc::clone(&in_flight);
                let max_in_flight = Arc::clone(&max_in_flight);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_in_flight.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, String>(items(&[1]))
                }
            }
        };

        let watcher = ResourceWatcher::spawn("slow", fetch, WatcherConfig::new(Duration::from_millis(100)));

        // 10 poll intervals
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let fetches = calls.load(Ordering::SeqCst);
        assert!(fetches < 10, "expected fewer than 10 fetches, got {fetches}");
        assert!(fetches >= 3);
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
        assert!(watcher.status().skipped_ticks > 0);
        assert_eq!(*watcher.get_resources(), items(&[1]));
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_snapshot() {
        let (handle, ticker) = manual_ticker();
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = ResourceWatcher::spawn_with_ticker(
            "items",
            succeed_then_fail(Arc::clone(&calls)),
            WatcherConfig::default(),
            ticker,
        );
        let mut generation = watcher.subscribe();

        handle.tick();
        generation.changed().await.unwrap();
        assert_eq!(*watcher.get_resources(), items(&[1]));

        handle.tick();
        generation.changed().await.unwrap();
        assert_eq!(*watcher.get_resources(), items(&[1]));

        let status = watcher.status();
        assert_eq!(status.last_error, Some(WatchError::Fetch("connection refused".to_string())));
        assert_eq!(status.consecutive_failures, 1);
        assert_eq!(status.fetches, 2);
        assert!(status.has_synced());
        assert!(status.last_error_at.is_some());
    }

    #[tokio::test]
    async fn test_failure_before_success_stays_empty() {
        let (handle, ticker) = manual_ticker();
        let watcher = ResourceWatcher::spawn_with_ticker(
            "items",
            || async { Err::<Vec<Item>, _>("the server could not find the requested resource") },
            WatcherConfig::default(),
            ticker,
        );
        let mut generation = watcher.subscribe();

        handle.tick();
        generation.changed().await.unwrap();

        assert!(watcher.get_resources().is_empty());
        let status = watcher.status();
        assert!(!status.has_synced());
        assert!(matches!(status.last_error, Some(WatchError::Fetch(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_second_poll_keeps_first_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = ResourceWatcher::spawn(
            "items",
            succeed_then_fail(Arc::clone(&calls)),
            WatcherConfig::new(Duration::from_millis(100)),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*watcher.get_resources(), items(&[1]));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(*watcher.get_resources(), items(&[1]));
        assert!(watcher.status().consecutive_failures >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_fetch_times_out_and_returns_to_idle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (handle, ticker) = manual_ticker();
        let watcher = {
            let calls = Arc::clone(&calls);
            ResourceWatcher::spawn_with_ticker(
                "hung",
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    futures::future::pending::<Result<Vec<Item>, String>>()
                },
                WatcherConfig::default().with_fetch_timeout(Some(Duration::from_millis(50))),
                ticker,
            )
        };
        let mut generation = watcher.subscribe();

        handle.tick();
        generation.changed().await.unwrap();

        let status = watcher.status();
        assert_eq!(status.last_error, Some(WatchError::Timeout(Duration::from_millis(50))));
        assert_eq!(status.phase, WatchPhase::Idle);

        handle.tick();
        generation.changed().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_while_fetching_is_skipped() {
        let release = Arc::new(tokio::sync::Notify::new());
        let (_handle, ticker) = manual_ticker();
        let watcher = {
            let release = Arc::clone(&release);
            Arc::new(ResourceWatcher::spawn_with_ticker(
                "gated",
                move || {
                    let release = Arc::clone(&release);
                    async move {
                        release.notified().await;
                        Ok::<_, String>(items(&[7]))
                    }
                },
                WatcherConfig::default().with_fetch_timeout(None),
                ticker,
            ))
        };

        let first = {
            let watcher = Arc::clone(&watcher);
            tokio::spawn(async move { watcher.refresh().await })
        };
        while watcher.status().phase != WatchPhase::Fetching {
            tokio::task::yield_now().await;
        }

        assert_eq!(watcher.refresh().await, RefreshOutcome::Skipped);
        assert_eq!(watcher.status().skipped_ticks, 1);

        release.notify_one();
        assert_eq!(first.await.unwrap(), RefreshOutcome::Updated(1));
        assert_eq!(*watcher.get_resources(), items(&[7]));
    }

    #[tokio::test]
    async fn test_readers_see_previous_snapshot_while_fetching() {
        let release = Arc::new(tokio::sync::Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (handle, ticker) = manual_ticker();
        let watcher = {
            let release = Arc::clone(&release);
            let calls = Arc::clone(&calls);
            ResourceWatcher::spawn_with_ticker(
                "gated",
                move || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    let release = Arc::clone(&release);
                    async move {
                        if n > 0 {
                            release.notified().await;
                        }
                        Ok::<_, String>(items(&[u32::try_from(n).unwrap(), 10]))
                    }
                },
                WatcherConfig::default().with_fetch_timeout(None),
                ticker,
            )
        };
        let mut generation = watcher.subscribe();

        handle.tick();
        generation.changed().await.unwrap();
        assert_eq!(*watcher.get_resources(), items(&[0, 10]));

        handle.tick();
        while watcher.status().phase != WatchPhase::Fetching {
            tokio::task::yield_now().await;
        }

        // Reads during the fetch are answered from the first snapshot
        for _ in 0..3 {
            assert_eq!(*watcher.get_resources(), items(&[0, 10]));
            tokio::task::yield_now().await;
        }
        assert_eq!(watcher.status().resources, 2);
        assert_eq!(watcher.status().fetches, 1);

        release.notify_one();
        generation.changed().await.unwrap();
        assert_eq!(*watcher.get_resources(), items(&[1, 10]));
        assert_eq!(watcher.status().phase, WatchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_policy_skips_ticks_after_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = {
            let calls = Arc::clone(&calls);
            ResourceWatcher::spawn(
                "failing",
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err::<Vec<Item>, _>("503 Service Unavailable") }
                },
                WatcherConfig::new(Duration::from_millis(100)).with_failure_policy(FailurePolicy::Backoff {
                    min: Duration::from_millis(300),
                    max: Duration::from_secs(1),
                }),
            )
        };

        tokio::time::sleep(Duration::from_millis(1050)).await;

        let fetches = calls.load(Ordering::SeqCst);
        assert!(fetches < 10, "expected backoff to drop ticks, got {fetches} fetches");
        let status = watcher.status();
        assert!(status.backed_off_ticks > 0);
        assert_eq!(status.consecutive_failures as usize, fetches);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_refreshing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = {
            let calls = Arc::clone(&calls);
            ResourceWatcher::spawn(
                "stopping",
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok::<_, String>(items(&[1])) }
                },
                WatcherConfig::new(Duration::from_millis(100)),
            )
        };

        tokio::time::sleep(Duration::from_millis(250)).await;
        watcher.shutdown();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let before = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);
        assert!(!watcher.is_running());
        assert_eq!(*watcher.get_resources(), items(&[1]));
    }

    #[test]
    fn test_status_serializes_error_as_message() {
        let status = WatchStatus {
            name: "documents".to_string(),
            phase: WatchPhase::Idle,
            resources: 0,
            poll_interval_ms: 30_000,
            last_fetch: None,
            last_error: Some(WatchError::Timeout(Duration::from_secs(30))),
            last_error_at: None,
            consecutive_failures: 1,
            fetches: 1,
            skipped_ticks: 0,
            backed_off_ticks: 0,
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["lastError"], "fetch timed out after 30s");
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["pollIntervalMs"], 30_000);
    }
}
