//! Page view-state containers.
//!
//! A page owns one poller, one visibility signal, and the latest snapshot
//! from its data source. Opening a page spawns the poller; closing it
//! clears the still-interested flag and shuts the poller down, so a fetch
//! that resolves afterwards is discarded instead of mutating state nobody
//! renders.

pub mod dashboard;
pub mod user_dashboard;

pub use dashboard::DashboardPage;
pub use user_dashboard::UserDashboardPage;
