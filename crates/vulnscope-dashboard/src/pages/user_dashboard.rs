//! The per-user dashboard page (activity feed, bookmarks, alert rules).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use vulnscope_core::Preferences;
use vulnscope_sync::{
    ErrorCallback, FetchError, FetchFn, Poller, PollerError, VisibilitySignal,
};

use crate::models::UserActivitySnapshot;
use crate::refresh::poller_config_from_preferences;
use crate::sources::UserActivitySource;

type SharedSnapshot = Arc<RwLock<Option<UserActivitySnapshot>>>;

/// View state for the user dashboard, kept fresh by a poller.
pub struct UserDashboardPage {
    data: SharedSnapshot,
    alive: Arc<AtomicBool>,
    visibility: VisibilitySignal,
    poller: Poller,
}

impl UserDashboardPage {
    /// Open the page; see [`crate::pages::DashboardPage::open`] for the
    /// preference-to-schedule mapping, which is identical.
    pub fn open(source: Arc<dyn UserActivitySource>, preferences: &Preferences) -> Self {
        let data: SharedSnapshot = Arc::new(RwLock::new(None));
        let alive = Arc::new(AtomicBool::new(true));
        let visibility = VisibilitySignal::new();

        let config = poller_config_from_preferences(preferences);
        let on_error: ErrorCallback = Arc::new(|e: &FetchError| {
            warn!(event = "ui.user_dashboard.refresh_failed", error = %e);
        });
        let poller = Poller::spawn_with(
            user_activity_fetch(source, data.clone(), alive.clone()),
            config,
            Some(visibility.subscribe()),
            Some(on_error),
        );

        info!(
            event = "ui.user_dashboard.opened",
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
    pub fn snapshot(&self) -> Option<UserActivitySnapshot> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
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
    /// running poller.
    pub fn apply_preferences(&self, preferences: &Preferences) -> Result<(), PollerError> {
        let config = poller_config_from_preferences(preferences);
        self.poller.set_interval(config.interval)?;
        self.poller.set_enabled(config.enabled)
    }

    /// The page's visibility signal.
    pub fn visibility(&self) -> &VisibilitySignal {
        &self.visibility
    }

    /// Close the page. A fetch already in flight completes but its result
    /// is discarded.
    pub async fn close(self) {
        let UserDashboardPage {
            alive,
            poller,
            ..
        } = self;
        alive.store(false, Ordering::SeqCst);
        info!(event = "ui.user_dashboard.closed", poller_id = %poller.id());
        poller.shutdown().await;
    }
}

fn user_activity_fetch(
    source: Arc<dyn UserActivitySource>,
    data: SharedSnapshot,
    alive: Arc<AtomicBool>,
) -> FetchFn {
    Arc::new(move || {
        let source = source.clone();
        let data = data.clone();
        let alive = alive.clone();
        Box::pin(async move {
            let snapshot = source.fetch_user_activity().await?;
            if alive.load(Ordering::SeqCst) {
                *data.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot);
                debug!(event = "ui.user_dashboard.snapshot_applied");
            } else {
                debug!(event = "ui.user_dashboard.snapshot_discarded");
            }
            Ok(())
        })
    })
}
