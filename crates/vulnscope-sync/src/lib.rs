//! vulnscope-sync: Realtime polling controller for the VulnScope dashboard
//!
//! Invokes a caller-supplied asynchronous fetch operation on a fixed
//! cadence, without overlapping invocations, while respecting visibility
//! and enable/disable signals. Pages hand the controller a fetch function
//! and render the status it publishes (for example a "last updated"
//! indicator).
//!
//! # Main Entry Points
//!
//! - [`poller::Poller`] - Spawn and control a polling task
//! - [`visibility::VisibilitySignal`] - Feed the host tab-visibility signal
//! - [`poller::PollStatus`] - Rendered polling state

pub mod errors;
pub mod poller;
pub mod visibility;

// Re-export commonly used types at crate root for convenience
pub use errors::{FetchError, PollerError};
pub use poller::fetch::{FetchCell, FetchFn, FetchFuture};
pub use poller::{ErrorCallback, PollPhase, PollStatus, Poller, PollerConfig};
pub use visibility::{Visibility, VisibilitySignal};
