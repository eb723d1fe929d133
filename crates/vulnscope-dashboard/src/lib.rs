//! Page-level consumers of the VulnScope refresh layer.
//!
//! Wires the polling controller from `vulnscope-sync` and the stored
//! preferences from `vulnscope-core` to page view state: the main
//! dashboard and the per-user dashboard.

pub mod models;
pub mod pages;
pub mod refresh;
pub mod sources;

pub use models::{ActivityEntry, DashboardSnapshot, SeverityCounts, UserActivitySnapshot};
pub use pages::{DashboardPage, UserDashboardPage};
pub use refresh::poller_config_from_preferences;
pub use sources::{DashboardSource, UserActivitySource};
