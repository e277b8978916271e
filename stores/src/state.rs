//! State containers the stores mutate.
//!
//! DESIGN
//! ======
//! Stores never own their state directly; they hold a [`StateCell`] handed
//! to them by the application root. The browser passes a cell backed by an
//! `RwSignal` so pages re-render on change, the CLI and tests pass
//! [`SharedState`].

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::{Arc, Mutex, PoisonError};

pub trait StateCell<S> {
    /// Mutate the state in place.
    fn update(&self, f: impl FnOnce(&mut S));

    /// Read the state without subscribing to changes.
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R;

    fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.with(S::clone)
    }
}

/// Plain shared state for non-reactive callers.
#[derive(Debug, Default)]
pub struct SharedState<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedState<S> {
    pub fn new(state: S) -> Self {
        Self { inner: Arc::new(Mutex::new(state)) }
    }
}

impl<S> Clone for SharedState<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S> StateCell<S> for SharedState<S> {
    fn update(&self, f: impl FnOnce(&mut S)) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

/// Loading/error bookkeeping shared by every store state.
pub trait Tracked {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

/// Run one store action with the common bookkeeping: set `loading` and clear
/// `error` first, record the failure text on error, and always reset
/// `loading` when the action settles.
pub(crate) async fn track<S, C, T>(
    state: &C,
    fallback: &str,
    action: impl Future<Output = Result<T, crate::ApiError>>,
) -> Result<T, crate::ApiError>
where
    S: Tracked,
    C: StateCell<S>,
{
    state.update(|s| {
        s.set_loading(true);
        s.set_error(None);
    });
    let result = action.await;
    state.update(|s| {
        if let Err(err) = &result {
            s.set_error(Some(err.display_message(fallback)));
        }
        s.set_loading(false);
    });
    result
}
