//! vulnscope-core: Core library for the VulnScope dashboard client
//!
//! This library provides the preference-synchronization layer shared by
//! every page of the dashboard: the user preferences record, its on-disk
//! persistence, and the store that applies optimistic updates with an
//! explicit save step.
//!
//! # Main Entry Points
//!
//! - [`preferences`] - Load, read, update, save user preferences
//! - [`events`] - State-change events emitted by store operations
//! - [`errors`] - Error taxonomy shared across the workspace
//! - [`logging`] - Logging initialization

pub mod errors;
pub mod events;
pub mod logging;
pub mod preferences;

// Re-export commonly used types at crate root for convenience
pub use errors::{VulnScopeError, VulnScopeResult};
pub use events::Event;
pub use preferences::errors::{PersistenceError, PreferencesError};
pub use preferences::persistence::{FilePreferencesBackend, PreferencesBackend};
pub use preferences::store::PreferencesStore;
pub use preferences::types::{
    AccessibilityPreferences, DashboardLayout, FontSize, NotificationPreferences, PreferenceUpdate,
    Preferences, Theme,
};

// Re-export logging initialization
pub use logging::init_logging;
