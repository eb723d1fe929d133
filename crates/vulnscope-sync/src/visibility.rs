//! Host visibility signal.
//!
//! The host environment (the rendering layer embedding this library)
//! drives a [`VisibilitySignal`] from its document/tab visibility events;
//! pollers hold the receiving side and suspend scheduling while hidden.

use tokio::sync::watch;

/// Whether the document/tab owning a page is currently foregrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Sending side of the visibility signal.
///
/// Keep this handle alive for as long as pollers subscribe to it; dropping
/// it freezes subscribers at the last observed value.
#[derive(Debug)]
pub struct VisibilitySignal {
    tx: watch::Sender<Visibility>,
}

impl VisibilitySignal {
    /// Create a signal starting in the `Visible` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Visibility::Visible);
        Self { tx }
    }

    /// Publish a visibility change. No-op when the value is unchanged.
    pub fn set(&self, visibility: Visibility) {
        self.tx.send_if_modified(|current| {
            if *current == visibility {
                return false;
            }
            tracing::debug!(
                event = "sync.visibility.changed",
                visible = visibility.is_visible(),
            );
            *current = visibility;
            true
        });
    }

    /// Current visibility.
    pub fn get(&self) -> Visibility {
        *self.tx.borrow()
    }

    /// Subscribe a poller (or any other consumer) to this signal.
    pub fn subscribe(&self) -> watch::Receiver<Visibility> {
        self.tx.subscribe()
    }
}

impl Default for VisibilitySignal {
    fn default() -> Self {
        Self::new()
    }
}
