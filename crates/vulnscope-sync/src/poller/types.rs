use std::time::Duration;

use chrono::{DateTime, Utc};

/// Configuration for a [`super::Poller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Cadence between invocations, measured from the start of the
    /// previous invocation.
    pub interval: Duration,
    /// Whether the schedule is armed. A disabled poller only reacts to
    /// handle commands.
    pub enabled: bool,
    /// Suspend scheduling while the visibility signal reports `Hidden`.
    pub pause_when_hidden: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            // Matches the preferences default of 300,000 ms.
            interval: Duration::from_secs(300),
            enabled: true,
            pause_when_hidden: true,
        }
    }
}

/// Lifecycle phase of a poll task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// The schedule is disarmed; nothing fires until re-enabled.
    Disabled,
    /// Armed and waiting for the next deadline.
    Idle,
    /// A fetch invocation is currently in flight.
    Fetching,
    /// Armed but suspended because the page is hidden.
    Paused,
}

/// Snapshot of a poll task's state, published through a watch channel for
/// consumers to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollStatus {
    pub phase: PollPhase,
    /// Completion time of the most recent invocation (success or handled
    /// failure). `None` until the first invocation completes.
    pub last_fetch: Option<DateTime<Utc>>,
    /// Last value observed from the visibility signal.
    pub is_page_visible: bool,
    /// True while the page is hidden with `pause_when_hidden` set, or
    /// while the controller is disabled.
    pub is_paused: bool,
}

impl PollStatus {
    /// True only while the fetch future is unresolved.
    pub fn is_fetching(&self) -> bool {
        self.phase == PollPhase::Fetching
    }
}
