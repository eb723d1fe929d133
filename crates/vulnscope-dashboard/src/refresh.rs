//! Mapping from stored preferences to poller configuration.

use std::time::Duration;

use vulnscope_core::Preferences;
use vulnscope_sync::PollerConfig;

/// Derive a page poller's configuration from the user's preferences.
///
/// `auto_refresh` arms the schedule and `refresh_interval_ms` sets the
/// cadence. Pages always pause while hidden; there is no preference for
/// polling a backgrounded tab.
pub fn poller_config_from_preferences(preferences: &Preferences) -> PollerConfig {
    PollerConfig {
        interval: Duration::from_millis(preferences.refresh_interval_ms),
        enabled: preferences.auto_refresh,
        pause_when_hidden: true,
    }
}
