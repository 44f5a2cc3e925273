//! Implements a struct that holds the state of the web server.

use crate::{Dashboard, DashboardConfig, TransactionApi};

/// The state of the web server.
pub struct AppState<A> {
    /// The dashboard shared by every request.
    pub dashboard: Dashboard<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
        }
    }
}

impl<A: TransactionApi> AppState<A> {
    /// Create a new [AppState] that talks to the backend through `api`.
    pub fn new(api: A, config: DashboardConfig) -> Self {
        Self {
            dashboard: Dashboard::new(api, config),
        }
    }
}
