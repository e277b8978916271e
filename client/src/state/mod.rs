//! Reactive store containers for the browser.
//!
//! DESIGN
//! ======
//! The `stores` crate mutates state through `StateCell`. Here that cell is
//! an `RwSignal`, so any view reading a store's signal re-renders when the
//! store changes it. The aliases below are the concrete store types the
//! application root places in context.


use leptos::prelude::*;
use stores::{Post, PostsStore, ResourceState, SessionState, SessionStore, StateCell, Task, TasksStore};

/// `StateCell` backed by a Leptos signal.
pub struct Reactive<S: Send + Sync + 'static>(RwSignal<S>);

impl<S: Send + Sync + 'static> Reactive<S> {
    pub fn new(state: S) -> Self {
        Self(RwSignal::new(state))
    }

    /// The underlying signal, for tracked reads in views.
    pub fn signal(&self) -> RwSignal<S> {
        self.0
    }
}

impl<S: Send + Sync + 'static> Clone for Reactive<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Send + Sync + 'static> Copy for Reactive<S> {}

impl<S: Send + Sync + 'static> StateCell<S> for Reactive<S> {
    fn update(&self, f: impl FnOnce(&mut S)) {
        self.0.update(f);
    }

    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.0.with_untracked(f)
    }
}

pub type Session = SessionStore<Reactive<SessionState>>;
pub type Tasks = TasksStore<Reactive<ResourceState<Task>>>;
pub type Posts = PostsStore<Reactive<ResourceState<Post>>>;
