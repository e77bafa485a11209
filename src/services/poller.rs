use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus};
use crate::services::api::BookingApi;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Notification payload when a watched booking leaves `pending`.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub previous: BookingStatus,
    pub current: BookingStatus,
    pub booking: Booking,
}

struct PollerShared {
    stopped: AtomicBool,
    elapsed_secs: AtomicU64,
    latest: Mutex<Option<Booking>>,
}

/// Periodically fetches the current actor's latest booking and surfaces
/// status transitions, since the backend offers no push channel.
///
/// The fetch shares one task with its ticker, so a slow fetch delays the
/// next tick rather than overlapping it; two fetches are never in flight
/// at once for the same poller.
pub struct BookingStatusPoller {
    api: Arc<dyn BookingApi>,
    interval: Duration,
    shared: Arc<PollerShared>,
    fetch_task: Option<JoinHandle<()>>,
    clock_task: Option<JoinHandle<()>>,
}

impl BookingStatusPoller {
    pub fn new(api: Arc<dyn BookingApi>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            shared: Arc::new(PollerShared {
                stopped: AtomicBool::new(false),
                elapsed_secs: AtomicU64::new(0),
                latest: Mutex::new(None),
            }),
            fetch_task: None,
            clock_task: None,
        }
    }

    /// Begin polling. The first fetch fires immediately, then every
    /// interval. Fetch errors go to `on_error` and the loop keeps going;
    /// they are never fatal. Calling `start` on a running poller is a
    /// no-op.
    pub fn start<U, E>(&mut self, on_update: U, on_error: E)
    where
        U: Fn(StatusChange) + Send + 'static,
        E: Fn(ApiError) + Send + 'static,
    {
        if self.fetch_task.is_some() {
            return;
        }
        self.shared.stopped.store(false, Ordering::SeqCst);

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.fetch_task = Some(tokio::spawn(async move {
            let mut ticks = IntervalStream::new(ticker);
            while ticks.next().await.is_some() {
                if shared.stopped.load(Ordering::SeqCst) {
                    break;
                }
                match api.latest_booking().await {
                    Ok(Some(fresh)) => {
                        let previous = shared.latest.lock().unwrap().as_ref().map(|b| b.status);
                        let changed = previous == Some(BookingStatus::Pending)
                            && fresh.status != BookingStatus::Pending;
                        // Cache updates on every successful fetch,
                        // whether or not the status moved
                        *shared.latest.lock().unwrap() = Some(fresh.clone());
                        if changed && !shared.stopped.load(Ordering::SeqCst) {
                            tracing::info!(
                                booking_id = %fresh.id,
                                status = fresh.status.as_str(),
                                "booking status changed"
                            );
                            on_update(StatusChange {
                                previous: BookingStatus::Pending,
                                current: fresh.status,
                                booking: fresh,
                            });
                        }
                    }
                    Ok(None) => {
                        shared.latest.lock().unwrap().take();
                    }
                    Err(e) => {
                        if shared.stopped.load(Ordering::SeqCst) {
                            break;
                        }
                        tracing::warn!(error = %e, "latest booking fetch failed, retrying next tick");
                        on_error(e);
                    }
                }
            }
        }));

        // Elapsed-seconds ticker for UI display; decorative only
        let shared = Arc::clone(&self.shared);
        let mut seconds = tokio::time::interval_at(
            Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );
        seconds.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.clock_task = Some(tokio::spawn(async move {
            let mut ticks = IntervalStream::new(seconds);
            while ticks.next().await.is_some() {
                if shared.stopped.load(Ordering::SeqCst) {
                    break;
                }
                shared.elapsed_secs.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    /// Stop both tickers. Idempotent; after `stop` returns no further
    /// `on_update`/`on_error` call fires.
    pub fn stop(&mut self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        if let Some(task) = self.clock_task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.fetch_task.is_some()
    }

    /// Seconds since polling started, at 1-second granularity.
    pub fn elapsed_secs(&self) -> u64 {
        self.shared.elapsed_secs.load(Ordering::SeqCst)
    }

    /// The cached latest booking; stale by up to one interval and never
    /// authoritative over the backend.
    pub fn latest(&self) -> Option<Booking> {
        self.shared.latest.lock().unwrap().clone()
    }

    /// Reflect the result of a successful mutating call immediately
    /// instead of waiting for the next tick.
    pub fn record(&self, booking: Booking) {
        *self.shared.latest.lock().unwrap() = Some(booking);
    }
}

impl Drop for BookingStatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
