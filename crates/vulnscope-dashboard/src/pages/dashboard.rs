//! The main dashboard page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use vulnscope_core::Preferences;
use vulnscope_sync::{
    ErrorCallback, FetchError, FetchFn, Poller, PollerError, VisibilitySignal,
};

use crate::models::DashboardSnapshot;
use crate::refresh::poller_config_from_preferences;
use crate::sources::DashboardSource;

type SharedSnapshot = Arc<RwLock<Option<DashboardSnapshot>>>;

/// View state for the main dashboard, kept fresh by a poller.
pub struct DashboardPage {
    data: SharedSnapshot,
    alive: Arc<AtomicBool>,
    visibility: VisibilitySignal,
    poller: Poller,
}

impl DashboardPage {
    /// Open the page: spawn a poller over `source` configured from the
    /// user's preferences. With `auto_refresh` enabled the first fetch
    /// fires immediately; otherwise the page waits for a manual refresh.
    pub fn open(source: Arc<dyn DashboardSource>, preferences: &Preferences) -> Self {
        let data: SharedSnapshot = Arc::new(RwLock::new(None));
        let alive = Arc::new(AtomicBool::new(true));
        let visibility = VisibilitySignal::new();

        let config = poller_config_from_preferences(preferences);
        let on_error: ErrorCallback = Arc::new(|e: &FetchError| {
            warn!(event = "ui.dashboard.refresh_failed", error = %e);
        });
        let poller = Poller::spawn_with(
            dashboard_fetch(source, data.clone(), alive.clone()),
            config,
            Some(visibility.subscribe()),
            Some(on_error),
        );

        info!(
            event = "ui.dashboard.opened",
            poller_id = %poller.id(),
            auto_refresh = config.enabled,
            interval_ms = config.interval.as_millis() as u64,
        );

        Self {
            data,
            alive,
            visibility,
            poller,
        }
    }

    /// Latest snapshot, if any fetch has completed and been applied.
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        read_snapshot(&self.data)
    }

    /// Completion time of the most recent fetch, from poll status.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.poller.status().last_fetch
    }

    /// True while a fetch is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.poller.status().is_fetching()
    }

    /// Trigger one immediate refresh, independent of the schedule.
    pub fn refresh_now(&self) -> Result<(), PollerError> {
        self.poller.refresh_now()
    }

    /// Push changed `auto_refresh` / `refresh_interval_ms` values to the
    /// running poller. Unchanged values are no-ops task-side.
    pub fn apply_preferences(&self, preferences: &Preferences) -> Result<(), PollerError> {
        let config = poller_config_from_preferences(preferences);
        self.poller.set_interval(config.interval)?;
        self.poller.set_enabled(config.enabled)
    }

    /// The page's visibility signal; the host drives it from tab
    /// visibility events.
    pub fn visibility(&self) -> &VisibilitySignal {
        &self.visibility
    }

    /// Close the page. A fetch already in flight completes but its result
    /// is discarded.
    pub async fn close(self) {
        let DashboardPage {
            alive,
            poller,
            ..
        } = self;
        alive.store(false, Ordering::SeqCst);
        info!(event = "ui.dashboard.closed", poller_id = %poller.id());
        poller.shutdown().await;
    }
}

/// Build the page's fetch closure: pull a snapshot from the source and
/// apply it to shared view state, unless the page closed mid-fetch.
fn dashboard_fetch(
    source: Arc<dyn DashboardSource>,
    data: SharedSnapshot,
    alive: Arc<AtomicBool>,
) -> FetchFn {
    Arc::new(move || {
        let source = source.clone();
        let data = data.clone();
        let alive = alive.clone();
        Box::pin(async move {
            let snapshot = source.fetch_dashboard().await?;
            if alive.load(Ordering::SeqCst) {
                *write_snapshot(&data) = Some(snapshot);
                debug!(event = "ui.dashboard.snapshot_applied");
            } else {
                debug!(event = "ui.dashboard.snapshot_discarded");
            }
            Ok(())
        })
    })
}

fn read_snapshot(data: &SharedSnapshot) -> Option<DashboardSnapshot> {
    // A writer never panics while holding the lock; recover the value on
    // the off chance it does.
    data.read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn write_snapshot(
    data: &SharedSnapshot,
) -> std::sync::RwLockWriteGuard<'_, Option<DashboardSnapshot>> {
    data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
