//! Default implementations for preference types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::preferences::types::{NotificationPreferences, Preferences};

/// Returns the default automatic refresh interval (300,000 ms = 5 minutes).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_refresh_interval_ms() -> u64 {
    300_000
}

/// Returns `true`.
///
/// Used by serde `#[serde(default = "...")]` attribute for toggles that
/// default to on.
pub fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Default::default(),
            font_size: Default::default(),
            dashboard_layout: Default::default(),
            auto_refresh: false,
            refresh_interval_ms: default_refresh_interval_ms(),
            notifications: Default::default(),
            accessibility: Default::default(),
        }
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_alerts: true,
            push_alerts: false,
            weekly_digest: true,
        }
    }
}
