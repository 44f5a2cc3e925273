use std::sync::{Arc, Mutex};

use crate::{
    TransactionApi,
    api::TransactionSummary,
    load::{LoadGuard, LoadTracker, Loadable, lock},
};

/// Shown when the summary could not be fetched.
pub const SUMMARY_ERROR_MESSAGE: &str = "Failed to load data";

/// What the summary panels currently show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryState {
    /// The last summary fetched successfully, if any.
    pub snapshot: Option<TransactionSummary>,
    /// Set when the last refresh failed.
    pub error: Option<&'static str>,
    load: LoadTracker,
}

impl SummaryState {
    /// Whether a refresh is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    /// The totals to display: the snapshot, or zeros if nothing has loaded yet.
    pub fn totals(&self) -> TransactionSummary {
        self.snapshot.clone().unwrap_or_default()
    }
}

impl Loadable for SummaryState {
    fn tracker(&mut self) -> &mut LoadTracker {
        &mut self.load
    }
}

/// Keeps the summary in sync with the backend.
pub struct SummaryController<A> {
    api: Arc<A>,
    state: Arc<Mutex<SummaryState>>,
}

impl<A> Clone for SummaryController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: TransactionApi> SummaryController<A> {
    /// Create a controller with no snapshot.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(SummaryState::default())),
        }
    }

    /// Fetch a new snapshot.
    ///
    /// A failure keeps the previous snapshot and sets the error message.
    pub async fn refresh(&self) {
        let guard = LoadGuard::begin(&self.state, |state| state.error = None);

        let result = self.api.get_summary().await;

        let mut state = lock(&self.state);
        if !state.load.settle(guard.generation()) {
            tracing::debug!("Discarding summary from a superseded refresh");
            return;
        }

        match result {
            Ok(summary) => state.snapshot = Some(summary),
            Err(error) => {
                tracing::error!("Could not refresh the summary: {error}");
                state.error = Some(SUMMARY_ERROR_MESSAGE);
            }
        }
    }

    /// A copy of the current state.
    pub fn state(&self) -> SummaryState {
        lock(&self.state).clone()
    }
}
