//! An in-process [TransactionApi] whose responses are scripted by the test.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tokio::sync::oneshot;

use crate::{
    CsvFile, Error, Transaction, TransactionApi, TransactionId, TransactionList,
    TransactionSummary, UploadResult, load::lock,
};

enum Scripted<T> {
    Ready(Result<T, Error>),
    Held {
        response: Result<T, Error>,
        requested: oneshot::Sender<()>,
        release: oneshot::Receiver<()>,
    },
}

struct Endpoint<T> {
    queue: VecDeque<Scripted<T>>,
    calls: usize,
}

impl<T> Default for Endpoint<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            calls: 0,
        }
    }
}

impl<T> Endpoint<T> {
    fn push(&mut self, response: Result<T, Error>) {
        self.queue.push_back(Scripted::Ready(response));
    }

    fn hold(&mut self, response: Result<T, Error>) -> Gate {
        let (requested_tx, requested_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();

        self.queue.push_back(Scripted::Held {
            response,
            requested: requested_tx,
            release: release_rx,
        });

        Gate {
            requested: requested_rx,
            release: release_tx,
        }
    }
}

#[derive(Default)]
struct Inner {
    summary: Endpoint<TransactionSummary>,
    transactions: Endpoint<TransactionList>,
    transaction: Endpoint<Transaction>,
    upload: Endpoint<UploadResult>,
    last_limit: Option<usize>,
    uploaded: Vec<CsvFile>,
}

/// Holds back a scripted response until the test releases it.
pub(crate) struct Gate {
    requested: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl Gate {
    /// Wait until the code under test has made the request.
    pub(crate) async fn wait_until_requested(&mut self) {
        (&mut self.requested)
            .await
            .expect("the fake API dropped the request");
    }

    /// Let the response through.
    pub(crate) fn release(self) {
        let _ = self.release.send(());
    }
}

/// Answers each call with the next response queued for that endpoint.
///
/// A call with nothing queued fails with [Error::Transport]. Clones share the
/// same queues and counters.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

impl FakeApi {
    pub(crate) fn push_summary(&self, response: Result<TransactionSummary, Error>) {
        lock(&self.inner).summary.push(response);
    }

    pub(crate) fn hold_summary(&self, response: Result<TransactionSummary, Error>) -> Gate {
        lock(&self.inner).summary.hold(response)
    }

    pub(crate) fn push_transactions(&self, response: Result<TransactionList, Error>) {
        lock(&self.inner).transactions.push(response);
    }

    pub(crate) fn hold_transactions(&self, response: Result<TransactionList, Error>) -> Gate {
        lock(&self.inner).transactions.hold(response)
    }

    pub(crate) fn push_transaction(&self, response: Result<Transaction, Error>) {
        lock(&self.inner).transaction.push(response);
    }

    pub(crate) fn push_upload(&self, response: Result<UploadResult, Error>) {
        lock(&self.inner).upload.push(response);
    }

    pub(crate) fn hold_upload(&self, response: Result<UploadResult, Error>) -> Gate {
        lock(&self.inner).upload.hold(response)
    }

    pub(crate) fn summary_calls(&self) -> usize {
        lock(&self.inner).summary.calls
    }

    pub(crate) fn transactions_calls(&self) -> usize {
        lock(&self.inner).transactions.calls
    }

    pub(crate) fn upload_calls(&self) -> usize {
        lock(&self.inner).upload.calls
    }

    /// The `limit` passed to the most recent call to `get_transactions`.
    pub(crate) fn last_limit(&self) -> Option<usize> {
        lock(&self.inner).last_limit
    }

    /// The files passed to `upload_csv`, oldest first.
    pub(crate) fn uploaded(&self) -> Vec<CsvFile> {
        lock(&self.inner).uploaded.clone()
    }

    async fn respond<T>(
        &self,
        endpoint: impl FnOnce(&mut Inner) -> &mut Endpoint<T>,
    ) -> Result<T, Error> {
        let next = {
            let mut inner = lock(&self.inner);
            let endpoint = endpoint(&mut inner);
            endpoint.calls += 1;
            endpoint.queue.pop_front()
        };

        match next {
            Some(Scripted::Ready(response)) => response,
            Some(Scripted::Held {
                response,
                requested,
                release,
            }) => {
                let _ = requested.send(());
                let _ = release.await;
                response
            }
            None => Err(Error::Transport("no response scripted".to_owned())),
        }
    }
}

impl TransactionApi for FakeApi {
    async fn get_summary(&self) -> Result<TransactionSummary, Error> {
        self.respond(|inner| &mut inner.summary).await
    }

    async fn get_transactions(&self, limit: usize) -> Result<TransactionList, Error> {
        lock(&self.inner).last_limit = Some(limit);
        self.respond(|inner| &mut inner.transactions).await
    }

    async fn get_transaction_by_id(&self, _id: TransactionId) -> Result<Transaction, Error> {
        self.respond(|inner| &mut inner.transaction).await
    }

    async fn upload_csv(&self, file: CsvFile) -> Result<UploadResult, Error> {
        lock(&self.inner).uploaded.push(file);
        self.respond(|inner| &mut inner.upload).await
    }
}
