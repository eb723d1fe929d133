//! Data-source seams for the pages.
//!
//! The real implementations call the backend HTTP API and live outside
//! this crate; pages only see these traits, which keeps them testable
//! with stub sources.

use futures::future::BoxFuture;
use vulnscope_sync::FetchError;

use crate::models::{DashboardSnapshot, UserActivitySnapshot};

/// Produces the main dashboard's view data.
pub trait DashboardSource: Send + Sync {
    fn fetch_dashboard(&self) -> BoxFuture<'static, Result<DashboardSnapshot, FetchError>>;
}

/// Produces the user dashboard's view data.
pub trait UserActivitySource: Send + Sync {
    fn fetch_user_activity(&self) -> BoxFuture<'static, Result<UserActivitySnapshot, FetchError>>;
}
