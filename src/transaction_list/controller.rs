use std::sync::{Arc, Mutex};

use crate::{
    Transaction, TransactionApi,
    load::{LoadGuard, LoadTracker, Loadable, lock},
    transaction_list::sort::{SortOrder, sort_by_amount},
};

/// Shown when the transactions could not be fetched.
pub const LIST_ERROR_MESSAGE: &str = "Failed to load transactions";
/// Shown when the backend has no transactions.
pub const EMPTY_LIST_MESSAGE: &str = "No transactions found.";
/// Shown while the transactions are being fetched.
pub const LOADING_LIST_MESSAGE: &str = "Loading transactions...";

/// The transactions held by the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionListState {
    /// The transactions from the last successful load, in display order.
    pub transactions: Vec<Transaction>,
    /// Set when the last load failed.
    pub error: Option<&'static str>,
    /// The order last applied by [TransactionListController::toggle_sort], if any.
    pub sort_order: Option<SortOrder>,
    load: LoadTracker,
}

/// Which of the mutually exclusive list views to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListPresentation<'a> {
    /// A load is in flight, or nothing has been loaded yet.
    Loading,
    /// The last load failed.
    Failed(&'static str),
    /// The last load succeeded but returned nothing.
    Empty,
    /// The transactions to show in the table.
    Populated(&'a [Transaction]),
}

impl TransactionListState {
    /// Whether a load is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    /// The order the next call to [TransactionListController::toggle_sort] applies.
    pub fn next_sort_order(&self) -> SortOrder {
        match self.sort_order {
            Some(order) => order.flipped(),
            None => SortOrder::Ascending,
        }
    }

    /// Decide what to show for this state.
    pub fn presentation(&self) -> ListPresentation<'_> {
        if self.is_loading() || !self.load.has_settled() {
            ListPresentation::Loading
        } else if let Some(error) = self.error {
            ListPresentation::Failed(error)
        } else if self.transactions.is_empty() {
            ListPresentation::Empty
        } else {
            ListPresentation::Populated(&self.transactions)
        }
    }
}

impl Loadable for TransactionListState {
    fn tracker(&mut self) -> &mut LoadTracker {
        &mut self.load
    }
}

/// Keeps the list of transactions in sync with the backend.
pub struct TransactionListController<A> {
    api: Arc<A>,
    state: Arc<Mutex<TransactionListState>>,
    page_size: usize,
}

impl<A> Clone for TransactionListController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            page_size: self.page_size,
        }
    }
}

impl<A: TransactionApi> TransactionListController<A> {
    /// Create a controller that fetches up to `page_size` transactions at a time.
    pub fn new(api: Arc<A>, page_size: usize) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(TransactionListState::default())),
            page_size,
        }
    }

    /// Fetch the transactions, replacing the ones held.
    ///
    /// The current sort order, if any, is applied to the new transactions.
    /// A failure keeps the transactions held and sets the error message.
    pub async fn load(&self) {
        let guard = LoadGuard::begin(&self.state, |state| state.error = None);

        let result = self.api.get_transactions(self.page_size).await;

        let mut state = lock(&self.state);
        if !state.load.settle(guard.generation()) {
            tracing::debug!("Discarding transactions from a superseded load");
            return;
        }

        match result {
            Ok(list) => {
                tracing::debug!("Loaded {} transactions", list.transactions.len());
                state.transactions = list.transactions;

                if let Some(order) = state.sort_order {
                    sort_by_amount(&mut state.transactions, order);
                }
            }
            Err(error) => {
                tracing::error!("Could not load transactions: {error}");
                state.error = Some(LIST_ERROR_MESSAGE);
            }
        }
    }

    /// Sort the held transactions by amount, ascending the first time and
    /// then alternating between descending and ascending.
    ///
    /// Returns the order that was applied.
    pub fn toggle_sort(&self) -> SortOrder {
        let mut state = lock(&self.state);
        let order = state.next_sort_order();

        sort_by_amount(&mut state.transactions, order);
        state.sort_order = Some(order);
        tracing::debug!("Sorted transactions by amount, {order}");

        order
    }

    /// A copy of the current state.
    pub fn state(&self) -> TransactionListState {
        lock(&self.state).clone()
    }
}
