use vulnscope_core::errors::VulnScopeError;

/// Failure of a caller-supplied fetch function.
///
/// Opaque to the poller: it is reported through the error callback and the
/// schedule continues undisturbed (no backoff, no retry before the next
/// regular tick).
#[derive(Debug, Clone, thiserror::Error)]
#[error("Fetch failed: {message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl VulnScopeError for FetchError {
    fn error_code(&self) -> &'static str {
        "POLL_FETCH_FAILED"
    }
}

/// Errors from poller handle operations.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    /// The poll task has terminated; the handle can no longer reach it.
    #[error("Poller task is no longer running")]
    ControllerGone,
}

impl VulnScopeError for PollerError {
    fn error_code(&self) -> &'static str {
        match self {
            PollerError::ControllerGone => "POLLER_GONE",
        }
    }
}
