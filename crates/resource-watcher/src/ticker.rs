//! Tick sources driving watcher refreshes.
//!
//! Production watchers use [`IntervalTicker`]; tests drive watchers by hand
//! with [`manual_ticker`] or run an [`IntervalTicker`] under tokio's paused clock.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// A source of refresh ticks.
///
/// `tick` resolves when the next refresh is due and returns `None` once the
/// source is exhausted, which stops the watcher loop.
#[async_trait::async_trait]
pub trait Ticker: Send + 'static {
    async fn tick(&mut self) -> Option<()>;
}

/// Wall-clock ticker; the first tick fires immediately.
///
/// Missed ticks are skipped rather than bursted, so a stalled runtime does not
/// produce a backlog of refreshes.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// Ticks every `period`; a zero period is raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        // tokio::time::interval panics on a zero period
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> Option<()> {
        self.interval.tick().await;
        Some(())
    }
}

/// Ticker fired explicitly through its [`TickHandle`].
#[derive(Debug)]
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Sending half of a [`ManualTicker`]. Dropping every handle stops the watcher.
#[derive(Debug, Clone)]
pub struct TickHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl TickHandle {
    /// Fire one tick. Returns false if the watcher loop is gone.
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Create a manually driven ticker.
pub fn manual_ticker() -> (TickHandle, ManualTicker) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TickHandle { tx }, ManualTicker { rx })
}

#[async_trait::async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}
