//! Preference type definitions for the VulnScope dashboard.
//!
//! This module contains the flat preferences record and its option enums.
//! These types are serialized/deserialized from the TOML preferences
//! document; unknown keys in a persisted document are ignored on load.

use serde::{Deserialize, Serialize};

/// The full user preferences record.
///
/// Invariant: exactly one active value per option at any time. Numeric
/// fields are clamped to their documented ranges when applied through the
/// store (see [`super::validation`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Color theme for the dashboard.
    #[serde(default)]
    pub theme: Theme,

    /// Base font size for dashboard text.
    #[serde(default)]
    pub font_size: FontSize,

    /// Layout style for dashboard cards and tables.
    #[serde(default)]
    pub dashboard_layout: DashboardLayout,

    /// Whether pages refresh their data automatically.
    #[serde(default)]
    pub auto_refresh: bool,

    /// Interval between automatic refreshes, in milliseconds.
    /// Valid range: 60,000 to 3,600,000. Default: 300,000 (5 minutes).
    #[serde(default = "super::defaults::default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Notification delivery toggles.
    #[serde(default)]
    pub notifications: NotificationPreferences,

    /// Accessibility toggles.
    #[serde(default)]
    pub accessibility: AccessibilityPreferences,
}

/// Color theme options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the host environment's theme.
    #[default]
    System,
    Light,
    Dark,
}

/// Font size options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Dashboard layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardLayout {
    #[default]
    Grid,
    List,
    Compact,
}

/// Notification delivery toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Send an email when a matching alert rule fires.
    #[serde(default = "super::defaults::default_true")]
    pub email_alerts: bool,

    /// Send a push notification when a matching alert rule fires.
    #[serde(default)]
    pub push_alerts: bool,

    /// Send the weekly vulnerability digest.
    #[serde(default = "super::defaults::default_true")]
    pub weekly_digest: bool,
}

/// Accessibility toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityPreferences {
    /// Render with a high-contrast palette.
    #[serde(default)]
    pub high_contrast: bool,

    /// Disable animated transitions.
    #[serde(default)]
    pub reduce_motion: bool,

    /// Enlarge interactive targets.
    #[serde(default)]
    pub large_targets: bool,
}

/// A single typed preference change.
///
/// Used with [`super::store::PreferencesStore::update`] to apply one
/// optimistic change to the in-memory snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceUpdate {
    Theme(Theme),
    FontSize(FontSize),
    DashboardLayout(DashboardLayout),
    AutoRefresh(bool),
    /// Clamped to the documented range when applied.
    RefreshIntervalMs(u64),
    EmailAlerts(bool),
    PushAlerts(bool),
    WeeklyDigest(bool),
    HighContrast(bool),
    ReduceMotion(bool),
    LargeTargets(bool),
}

impl PreferenceUpdate {
    /// Stable key naming the option this update targets.
    ///
    /// Matches the field path in the persisted TOML document.
    pub fn key(&self) -> &'static str {
        match self {
            PreferenceUpdate::Theme(_) => "theme",
            PreferenceUpdate::FontSize(_) => "font_size",
            PreferenceUpdate::DashboardLayout(_) => "dashboard_layout",
            PreferenceUpdate::AutoRefresh(_) => "auto_refresh",
            PreferenceUpdate::RefreshIntervalMs(_) => "refresh_interval_ms",
            PreferenceUpdate::EmailAlerts(_) => "notifications.email_alerts",
            PreferenceUpdate::PushAlerts(_) => "notifications.push_alerts",
            PreferenceUpdate::WeeklyDigest(_) => "notifications.weekly_digest",
            PreferenceUpdate::HighContrast(_) => "accessibility.high_contrast",
            PreferenceUpdate::ReduceMotion(_) => "accessibility.reduce_motion",
            PreferenceUpdate::LargeTargets(_) => "accessibility.large_targets",
        }
    }
}
