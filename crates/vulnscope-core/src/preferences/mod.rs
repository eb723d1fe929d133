//! # User Preferences System
//!
//! Session-scoped user preferences for the VulnScope dashboard: display
//! options, refresh behavior, notification and accessibility toggles.
//!
//! ## Lifecycle
//!
//! Preferences are loaded once per session from the persistence backend,
//! mutated through discrete optimistic updates, and persisted on explicit
//! save. The store is created at session start and dropped at sign-out;
//! there is no ambient global state.
//!
//! ## Example Document
//!
//! ```toml
//! # ~/.vulnscope/preferences.toml
//! theme = "dark"
//! font_size = "medium"
//! dashboard_layout = "grid"
//! auto_refresh = true
//! refresh_interval_ms = 120000
//!
//! [notifications]
//! email_alerts = true
//!
//! [accessibility]
//! high_contrast = true
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vulnscope_core::preferences::persistence::FilePreferencesBackend;
//! use vulnscope_core::preferences::store::PreferencesStore;
//! use vulnscope_core::preferences::types::PreferenceUpdate;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = FilePreferencesBackend::default_location()?;
//!     let (mut store, _loaded) = PreferencesStore::load(backend);
//!     store.update(PreferenceUpdate::AutoRefresh(true));
//!     store.save()?;
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod errors;
pub mod persistence;
pub mod store;
pub mod types;
pub mod validation;

// Public API exports
pub use errors::{PersistenceError, PreferencesError};
pub use persistence::{FilePreferencesBackend, PreferencesBackend};
pub use store::PreferencesStore;
pub use types::{
    AccessibilityPreferences, DashboardLayout, FontSize, NotificationPreferences, PreferenceUpdate,
    Preferences, Theme,
};
pub use validation::{MAX_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS, clamp_refresh_interval};
