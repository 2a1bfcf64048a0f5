//! Periodic "live" refresh driver.
//!
//! The dashboard simulates live updates by re-fetching on a timer, not by a
//! push channel. `LiveRefresher` owns that timer: a cancellable tokio task
//! with an explicit in-flight guard so a tick that fires while the previous
//! refresh cycle is still running is a no-op rather than a stacked request.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::HubError;

/// Interval presets offered by the dashboard shell.
pub const REFRESH_INTERVALS_MS: [u64; 4] = [3_000, 5_000, 10_000, 15_000];

pub struct LiveRefresher {
    cancel: CancellationToken,
    interval_ms: Arc<AtomicU64>,
    in_flight: Arc<AtomicBool>,
    started: AtomicBool,
}

impl LiveRefresher {
    pub fn new(interval: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            interval_ms: Arc::new(AtomicU64::new(interval.as_millis() as u64)),
            in_flight: Arc::new(AtomicBool::new(false)),
            started: AtomicBool::new(false),
        }
    }

    /// Spawn the refresh loop. `refresh` runs once per elapsed interval,
    /// except when the previous cycle has not finished yet. Returns an error
    /// if the loop was already started.
    pub fn start<F, Fut>(&self, refresh: F) -> Result<(), HubError>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(HubError::Validation("refresh loop already started".into()));
        }

        let cancel = self.cancel.clone();
        let interval_ms = self.interval_ms.clone();
        let in_flight = self.in_flight.clone();
        tokio::spawn(async move {
            loop {
                let wait = Duration::from_millis(interval_ms.load(Ordering::Relaxed).max(1));
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(wait) => {}
                }

                if in_flight.swap(true, Ordering::SeqCst) {
                    tracing::debug!("refresh tick skipped: previous cycle still in flight");
                    continue;
                }

                // Run the cycle off the timer task so ticking continues and
                // overlapping ticks hit the guard above. The flag is cleared
                // through the JoinHandle so a panicking cycle cannot leave
                // the refresher wedged.
                let guard = in_flight.clone();
                let cycle = tokio::spawn(refresh());
                tokio::spawn(async move {
                    if let Err(e) = cycle.await {
                        tracing::warn!("refresh cycle aborted: {}", e);
                    }
                    guard.store(false, Ordering::SeqCst);
                });
            }
            tracing::debug!("refresh loop stopped");
        });

        Ok(())
    }

    /// Stop the loop. Terminal: a stopped refresher cannot be restarted.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Change the interval; applies from the next tick onward.
    pub fn set_interval(&self, interval: Duration) {
        self.interval_ms
            .store((interval.as_millis() as u64).max(1), Ordering::Relaxed);
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Whether a refresh cycle is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl Default for LiveRefresher {
    fn default() -> Self {
        Self::new(Duration::from_millis(REFRESH_INTERVALS_MS[1]))
    }
}

impl Drop for LiveRefresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn ticks_invoke_the_refresh_callback() {
        let refresher = LiveRefresher::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        refresher
            .start(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        refresher.stop();
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn overlapping_ticks_are_no_ops() {
        let refresher = LiveRefresher::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        refresher
            .start(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    // Outlast several tick intervals.
                    tokio::time::sleep(Duration::from_millis(300)).await;
                }
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        refresher.stop();
        // Many ticks fired, but only the first cycle ran.
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_cycle_releases_the_guard() {
        let refresher = LiveRefresher::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        refresher
            .start(move || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) == 0 {
                        panic!("first cycle blows up");
                    }
                }
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;
        refresher.stop();
        // Later ticks must still run; a stuck in-flight flag would stop at 1.
        assert!(count.load(Ordering::SeqCst) >= 2);
        // Let any cycle spawned right at the stop boundary settle.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!refresher.is_refreshing());
    }

    #[tokio::test]
    async fn stop_halts_ticking() {
        let refresher = LiveRefresher::new(Duration::from_millis(10));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        refresher
            .start(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                }
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        refresher.stop();
        assert!(refresher.is_stopped());
        let after_stop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let refresher = LiveRefresher::new(Duration::from_millis(1000));
        refresher.start(|| async {}).unwrap();
        let err = refresher.start(|| async {}).unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
        refresher.stop();
    }

    #[tokio::test]
    async fn interval_roundtrip() {
        let refresher = LiveRefresher::default();
        assert_eq!(refresher.interval(), Duration::from_millis(5_000));
        refresher.set_interval(Duration::from_millis(3_000));
        assert_eq!(refresher.interval(), Duration::from_millis(3_000));
    }
}
