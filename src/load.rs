//! Bookkeeping shared by the controllers that fetch data from the backend.
//!
//! A load may be started while an earlier one is still waiting on the backend.
//! Each load takes a new generation number and only the newest generation may
//! write its result, so a slow response can never overwrite a newer one. Every
//! load also holds a claim on the loading flag which is released exactly once,
//! however the load ends.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Tracks the loads in flight for one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LoadTracker {
    in_flight: usize,
    generation: u64,
    settled: bool,
}

impl LoadTracker {
    fn begin(&mut self) -> u64 {
        self.in_flight += 1;
        self.generation += 1;
        self.generation
    }

    fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Whether any load is waiting on the backend.
    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Whether `generation` belongs to the most recently started load.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Whether the most recently started load has finished at some point.
    pub(crate) fn has_settled(&self) -> bool {
        self.settled
    }

    /// Record that the load with `generation` finished and may write its result.
    ///
    /// Returns `false` for a stale generation, whose result must be dropped.
    pub(crate) fn settle(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        self.settled = true;
        true
    }
}

/// Controller state that tracks its loads.
pub(crate) trait Loadable {
    fn tracker(&mut self) -> &mut LoadTracker;
}

/// A claim on the loading flag of the state in `state`.
///
/// The claim is released when the guard is dropped.
pub(crate) struct LoadGuard<S: Loadable> {
    state: Arc<Mutex<S>>,
    generation: u64,
}

impl<S: Loadable> LoadGuard<S> {
    /// Start a load: take a claim and a new generation, then run `prepare`
    /// on the state while the lock is still held.
    pub(crate) fn begin(state: &Arc<Mutex<S>>, prepare: impl FnOnce(&mut S)) -> Self {
        let mut locked = lock(state);
        let generation = locked.tracker().begin();
        prepare(&mut locked);

        Self {
            state: Arc::clone(state),
            generation,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl<S: Loadable> Drop for LoadGuard<S> {
    fn drop(&mut self) {
        lock(&self.state).tracker().release();
    }
}

/// Lock controller state.
///
/// The state is plain data that is replaced in single assignments, so a panic
/// while the lock was held cannot leave it half-written and poisoning is ignored.
pub(crate) fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
