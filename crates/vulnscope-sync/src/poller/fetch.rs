//! The fetch-function cell.
//!
//! The poll task never captures the fetch function at schedule time; it
//! reads it out of a shared cell on every invocation. Swapping the
//! function (for example when a page rebuilds its closure over fresh
//! captures) therefore never tears down or restarts the timer.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::errors::FetchError;

/// The future a fetch function returns.
pub type FetchFuture = BoxFuture<'static, Result<(), FetchError>>;

/// A caller-supplied fetch operation. Takes no arguments; the payload it
/// produces is the caller's concern (typically applied to page view state
/// inside the closure).
pub type FetchFn = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

/// Shared mutable cell holding the latest fetch function.
#[derive(Clone)]
pub struct FetchCell {
    inner: Arc<Mutex<FetchFn>>,
}

impl FetchCell {
    pub fn new(fetch: FetchFn) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fetch)),
        }
    }

    /// Replace the stored function. The next invocation calls the new one.
    pub fn set(&self, fetch: FetchFn) {
        *self.lock() = fetch;
    }

    /// Clone out the current function for one invocation.
    pub fn get(&self) -> FetchFn {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FetchFn> {
        // The lock is only held for a pointer clone or swap; a poisoned
        // mutex still holds a valid FetchFn.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for FetchCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCell").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetch(counter: Arc<AtomicUsize>) -> FetchFn {
        Arc::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        })
    }

    #[tokio::test]
    async fn test_cell_invokes_current_function() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cell = FetchCell::new(counting_fetch(counter.clone()));

        cell.get()().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_swaps_function_for_next_invocation() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let cell = FetchCell::new(counting_fetch(first.clone()));

        cell.get()().await.unwrap();
        cell.set(counting_fetch(second.clone()));
        cell.get()().await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
