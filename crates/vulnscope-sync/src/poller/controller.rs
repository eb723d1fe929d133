//! The poll task and its handle.
//!
//! [`Poller::spawn`] starts a tokio task owning the schedule; the returned
//! handle carries the command channel, the status watch, and the fetch
//! cell. Dropping the handle (or calling [`Poller::shutdown`]) terminates
//! the task; an in-flight fetch is allowed to complete and its result is
//! discarded by the consumer's still-interested guard.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{FetchError, PollerError};
use crate::poller::fetch::{FetchCell, FetchFn};
use crate::poller::types::{PollPhase, PollStatus, PollerConfig};
use crate::visibility::Visibility;

/// Observer for fetch failures. The schedule continues undisturbed after
/// the callback returns.
pub type ErrorCallback = Arc<dyn Fn(&FetchError) + Send + Sync>;

enum Command {
    RefreshNow,
    SetEnabled(bool),
    SetInterval(Duration),
    Shutdown,
}

/// Handle to a running poll task.
pub struct Poller {
    id: Uuid,
    commands: mpsc::UnboundedSender<Command>,
    status_rx: watch::Receiver<PollStatus>,
    fetch: FetchCell,
    task: JoinHandle<()>,
}

impl Poller {
    /// Spawn a poll task without a visibility signal or error callback.
    /// The controller behaves as always visible.
    pub fn spawn(fetch: FetchFn, config: PollerConfig) -> Self {
        Self::spawn_with(fetch, config, None, None)
    }

    /// Spawn a poll task wired to an optional visibility signal and an
    /// optional fetch-failure observer.
    ///
    /// When `config.enabled` is true the first invocation fires
    /// immediately.
    pub fn spawn_with(
        fetch: FetchFn,
        config: PollerConfig,
        visibility: Option<watch::Receiver<Visibility>>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        let id = Uuid::new_v4();
        let cell = FetchCell::new(fetch);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let visible = visibility
            .as_ref()
            .map(|rx| rx.borrow().is_visible())
            .unwrap_or(true);
        let paused_hidden = config.pause_when_hidden && !visible;
        let initial = PollStatus {
            phase: if !config.enabled {
                PollPhase::Disabled
            } else if paused_hidden {
                PollPhase::Paused
            } else {
                PollPhase::Idle
            },
            last_fetch: None,
            is_page_visible: visible,
            is_paused: paused_hidden || !config.enabled,
        };
        let (status_tx, status_rx) = watch::channel(initial);

        let task = PollTask {
            id,
            interval: config.interval,
            enabled: config.enabled,
            pause_when_hidden: config.pause_when_hidden,
            fetch: cell.clone(),
            on_error,
            commands: cmd_rx,
            visibility,
            visibility_closed: false,
            status_tx,
            last_fetch: None,
            last_started: None,
        };

        Self {
            id,
            commands: cmd_tx,
            status_rx,
            fetch: cell,
            task: tokio::spawn(task.run()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current status snapshot.
    pub fn status(&self) -> PollStatus {
        self.status_rx.borrow().clone()
    }

    /// Subscribe to status changes (for rendering "last updated" etc.).
    pub fn subscribe(&self) -> watch::Receiver<PollStatus> {
        self.status_rx.clone()
    }

    /// Perform one invocation immediately, independent of the schedule,
    /// and reset the schedule's reference point. Fires regardless of the
    /// current timer phase; it does not arm a disabled schedule.
    pub fn refresh_now(&self) -> Result<(), PollerError> {
        self.send(Command::RefreshNow)
    }

    /// Arm or disarm the schedule. Disabling cancels the pending tick;
    /// enabling restarts the cycle with an immediate invocation.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), PollerError> {
        self.send(Command::SetEnabled(enabled))
    }

    /// Change the cadence. Takes effect against the current reference
    /// point.
    pub fn set_interval(&self, interval: Duration) -> Result<(), PollerError> {
        self.send(Command::SetInterval(interval))
    }

    /// Swap the fetch function. The next invocation calls the new one;
    /// the timer is not torn down or restarted.
    pub fn set_fetch(&self, fetch: FetchFn) {
        self.fetch.set(fetch);
    }

    /// Terminate the poll task and wait for it to finish. An in-flight
    /// fetch completes first.
    pub async fn shutdown(self) {
        let Poller { commands, task, .. } = self;
        // Explicit command for the normal path; dropping the sender covers
        // a task that already drained the channel.
        let _ = commands.send(Command::Shutdown);
        drop(commands);
        let _ = task.await;
    }

    fn send(&self, cmd: Command) -> Result<(), PollerError> {
        self.commands.send(cmd).map_err(|_| PollerError::ControllerGone)
    }
}

struct PollTask {
    id: Uuid,
    interval: Duration,
    enabled: bool,
    pause_when_hidden: bool,
    fetch: FetchCell,
    on_error: Option<ErrorCallback>,
    commands: mpsc::UnboundedReceiver<Command>,
    visibility: Option<watch::Receiver<Visibility>>,
    /// Set when the visibility sender is dropped; the last observed value
    /// stays in effect and the change branch is disarmed.
    visibility_closed: bool,
    status_tx: watch::Sender<PollStatus>,
    last_fetch: Option<DateTime<Utc>>,
    /// Start of the most recent invocation; the schedule's reference
    /// point. `None` means the next tick is immediate (fresh enable).
    last_started: Option<Instant>,
}

impl PollTask {
    async fn run(mut self) {
        info!(
            event = "sync.poller.started",
            poller_id = %self.id,
            interval_ms = self.interval.as_millis() as u64,
            enabled = self.enabled,
            pause_when_hidden = self.pause_when_hidden,
        );

        loop {
            let active = self.enabled && !self.paused_by_visibility();
            self.publish(if !self.enabled {
                PollPhase::Disabled
            } else if !active {
                PollPhase::Paused
            } else {
                PollPhase::Idle
            });

            // Next deadline: previous start + interval. A deadline already
            // in the past (long fetch, resume after a long hidden period)
            // fires immediately.
            let deadline = self
                .last_started
                .map(|started| started + self.interval)
                .unwrap_or_else(Instant::now);
            let watch_visibility = self.visibility.is_some() && !self.visibility_closed;

            tokio::select! {
                cmd = self.commands.recv() => {
                    match cmd {
                        None | Some(Command::Shutdown) => break,
                        Some(Command::RefreshNow) => {
                            // Manual refresh fires regardless of timer
                            // phase; a disabled or paused schedule stays
                            // disarmed afterwards.
                            self.invoke().await;
                        }
                        Some(Command::SetEnabled(enabled)) => self.set_enabled(enabled),
                        Some(Command::SetInterval(interval)) => {
                            debug!(
                                event = "sync.poller.interval_changed",
                                poller_id = %self.id,
                                interval_ms = interval.as_millis() as u64,
                            );
                            self.interval = interval;
                        }
                    }
                }
                changed = Self::visibility_changed(&mut self.visibility), if watch_visibility => {
                    if changed.is_err() {
                        debug!(
                            event = "sync.poller.visibility_signal_closed",
                            poller_id = %self.id,
                        );
                        self.visibility_closed = true;
                    }
                    // Pause state and deadline are recomputed at the top of
                    // the loop; a stale resume fires immediately because
                    // its deadline has already passed.
                }
                _ = tokio::time::sleep_until(deadline), if active => {
                    self.invoke().await;
                }
            }
        }

        info!(event = "sync.poller.stopped", poller_id = %self.id);
    }

    async fn invoke(&mut self) {
        let started = Instant::now();
        self.last_started = Some(started);
        self.publish(PollPhase::Fetching);
        debug!(event = "sync.poller.fetch_started", poller_id = %self.id);

        // Awaited inline: at most one invocation in flight per controller.
        let fetch = self.fetch.get();
        let result = fetch().await;
        self.last_fetch = Some(Utc::now());

        match result {
            Ok(()) => {
                debug!(
                    event = "sync.poller.fetch_completed",
                    poller_id = %self.id,
                    duration_ms = started.elapsed().as_millis() as u64,
                );
            }
            Err(e) => {
                warn!(
                    event = "sync.poller.fetch_failed",
                    poller_id = %self.id,
                    error = %e,
                );
                if let Some(on_error) = &self.on_error {
                    on_error(&e);
                }
            }
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            // Restart the cycle: the next deadline is immediate.
            self.last_started = None;
            info!(event = "sync.poller.enabled", poller_id = %self.id);
        } else {
            // The active guard disarms the pending timer.
            info!(event = "sync.poller.disabled", poller_id = %self.id);
        }
    }

    fn visible(&self) -> bool {
        self.visibility
            .as_ref()
            .map(|rx| rx.borrow().is_visible())
            .unwrap_or(true)
    }

    fn paused_by_visibility(&self) -> bool {
        self.pause_when_hidden && !self.visible()
    }

    fn publish(&self, phase: PollPhase) {
        let status = PollStatus {
            phase,
            last_fetch: self.last_fetch,
            is_page_visible: self.visible(),
            is_paused: self.paused_by_visibility() || !self.enabled,
        };
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }

    async fn visibility_changed(
        visibility: &mut Option<watch::Receiver<Visibility>>,
    ) -> Result<(), watch::error::RecvError> {
        match visibility {
            Some(rx) => rx.changed().await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(counter: Arc<AtomicUsize>) -> FetchFn {
        Arc::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
    }

    fn failing_fetch() -> FetchFn {
        Arc::new(|| Box::pin(async { Err(FetchError::new("backend unavailable")) }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_enabled_fetches_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(counting_fetch(counter.clone()), PollerConfig::default());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(poller.status().last_fetch.is_some());

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_disabled_never_fetches() {
        let counter = Arc::new(AtomicUsize::new(0));
        let config = PollerConfig {
            enabled: false,
            ..Default::default()
        };
        let poller = Poller::spawn(counting_fetch(counter.clone()), config);

        tokio::time::sleep(Duration::from_secs(900)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        let status = poller.status();
        assert_eq!(status.phase, PollPhase::Disabled);
        assert!(status.is_paused);
        assert!(status.last_fetch.is_none());

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_fires_while_disabled_without_arming_schedule() {
        let counter = Arc::new(AtomicUsize::new(0));
        let config = PollerConfig {
            enabled: false,
            interval: Duration::from_millis(1000),
            ..Default::default()
        };
        let poller = Poller::spawn(counting_fetch(counter.clone()), config);

        poller.refresh_now().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(poller.status().phase, PollPhase::Disabled);

        // One-shot only: the schedule stays disarmed
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_reaches_error_callback_and_polling_continues() {
        let failures = Arc::new(AtomicUsize::new(0));
        let observed = failures.clone();
        let on_error: ErrorCallback = Arc::new(move |e: &FetchError| {
            assert_eq!(e.message, "backend unavailable");
            observed.fetch_add(1, Ordering::SeqCst);
        });

        let config = PollerConfig {
            interval: Duration::from_millis(1000),
            ..Default::default()
        };
        let poller = Poller::spawn_with(failing_fetch(), config, None, Some(on_error));

        // Invocations at t=0, 1000, 2000 keep firing despite failures
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(failures.load(Ordering::SeqCst), 3);
        // last_fetch is updated on handled failures too
        assert!(poller.status().last_fetch.is_some());

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_terminates_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(counting_fetch(counter), PollerConfig::default());
        let status_rx = poller.subscribe();

        poller.shutdown().await;

        // The task owned the status sender; a completed task means the
        // watch channel is closed.
        assert!(status_rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_terminates_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(counting_fetch(counter.clone()), PollerConfig::default());
        let status_rx = poller.subscribe();

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(poller);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(status_rx.has_changed().is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_fetch_swaps_function_without_restarting_schedule() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let config = PollerConfig {
            interval: Duration::from_millis(1000),
            ..Default::default()
        };
        let poller = Poller::spawn(counting_fetch(first.clone()), config);

        // First invocation at t=0 uses the original function
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(first.load(Ordering::SeqCst), 1);

        poller.set_fetch(counting_fetch(second.clone()));

        // The t=1000 tick calls the new function on the original schedule
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        poller.shutdown().await;
    }
}
