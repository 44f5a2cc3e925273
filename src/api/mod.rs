//! Access to the PaySplit backend.
//!
//! The backend owns CSV parsing, persistence and aggregation. This module
//! only knows its HTTP contract: four endpoints under the `/api` prefix.

mod client;
mod models;

use std::future::Future;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use models::{
    CsvFile, Transaction, TransactionId, TransactionList, TransactionSummary, TransactionType,
    UploadResult,
};

use crate::Error;

/// The number of transactions requested from the list endpoint by default.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// The operations the backend offers.
///
/// Every failure, whether the backend could not be reached, answered with an
/// error status or sent something unexpected, is reported as
/// [Error::Transport]. Nothing is retried.
pub trait TransactionApi: Send + Sync + 'static {
    /// Get the aggregate totals over all transactions.
    fn get_summary(&self) -> impl Future<Output = Result<TransactionSummary, Error>> + Send;

    /// Get at most `limit` transactions.
    fn get_transactions(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<TransactionList, Error>> + Send;

    /// Get a single transaction. A missing transaction is a transport error
    /// like any other.
    fn get_transaction_by_id(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;

    /// Upload a CSV file, returning the transactions the backend created from it.
    fn upload_csv(&self, file: CsvFile) -> impl Future<Output = Result<UploadResult, Error>> + Send;
}
