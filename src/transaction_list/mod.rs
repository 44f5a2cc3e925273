//! The table of transactions on the dashboard.

mod controller;
mod sort;
mod view;

pub use controller::{
    EMPTY_LIST_MESSAGE, LOADING_LIST_MESSAGE, ListPresentation,
    TransactionListController, TransactionListState,
};
pub use sort::SortOrder;
pub(crate) use view::{format_date, transaction_list_view};
