//! # Realtime Polling Controller
//!
//! A [`Poller`] owns a spawned tokio task that repeatedly invokes a
//! caller-supplied fetch function on a fixed cadence. The fetch is awaited
//! inline by the poll task, so at most one invocation is ever in flight
//! per controller.
//!
//! ## Scheduling
//!
//! The next deadline is the start of the previous invocation plus the
//! configured interval. A deadline that falls inside a long-running fetch
//! fires as soon as the fetch completes. Enabling the controller (at spawn
//! or via [`Poller::set_enabled`]) triggers an immediate first invocation,
//! and [`Poller::refresh_now`] resets the schedule's reference point.
//!
//! ## State machine
//!
//! `Disabled -> Idle` on enable; `Idle -> Fetching` on tick or manual
//! trigger; `Fetching -> Idle` on completion (success or handled failure);
//! `Idle <-> Paused` on visibility or enable changes. The task terminates
//! when the handle is dropped or shut down.

pub mod controller;
pub mod fetch;
pub mod types;

pub use controller::{ErrorCallback, Poller};
pub use fetch::{FetchCell, FetchFn, FetchFuture};
pub use types::{PollPhase, PollStatus, PollerConfig};
