use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;

use crate::{
    AppState, CsvFile, DEFAULT_PAGE_SIZE, Error, Transaction, TransactionApi, TransactionId,
    dashboard::notice::{Notice, NoticeBoard},
    summary::SummaryController,
    transaction_list::TransactionListController,
    upload::{UploadController, UploadOutcome},
};

/// How long the upload success notice is shown, and how long the upload form
/// stays disabled after a successful upload.
pub const UPLOAD_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// The settings for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// The maximum number of transactions to fetch for the list.
    pub page_size: usize,
    /// How long the success notice is shown after an upload.
    pub notice_duration: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            notice_duration: UPLOAD_NOTICE_DURATION,
        }
    }
}

/// Ties the summary, the transaction list and the upload form together.
///
/// The dashboard owns the success notice: the upload form only reports how
/// many transactions were created and the dashboard decides what to show.
pub struct Dashboard<A> {
    api: Arc<A>,
    summary: SummaryController<A>,
    transactions: TransactionListController<A>,
    upload: UploadController<A>,
    notice: NoticeBoard,
    config: DashboardConfig,
}

impl<A> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            summary: self.summary.clone(),
            transactions: self.transactions.clone(),
            upload: self.upload.clone(),
            notice: self.notice.clone(),
            config: self.config,
        }
    }
}

impl<A: TransactionApi> Dashboard<A> {
    /// Create a dashboard that talks to the backend through `api`.
    pub fn new(api: A, config: DashboardConfig) -> Self {
        let api = Arc::new(api);

        Self {
            summary: SummaryController::new(Arc::clone(&api)),
            transactions: TransactionListController::new(Arc::clone(&api), config.page_size),
            upload: UploadController::new(Arc::clone(&api), config.notice_duration),
            notice: NoticeBoard::default(),
            config,
            api,
        }
    }

    /// Fetch the data shown when the dashboard is opened.
    pub async fn mount(&self) {
        tracing::debug!("Mounting dashboard");
        self.refresh().await;
    }

    /// Fetch the summary and the transactions again.
    pub async fn refresh(&self) {
        tokio::join!(self.summary.refresh(), self.transactions.load());
    }

    /// Upload `file` and, if the backend accepts it, show the success notice
    /// and fetch the summary and the transactions again.
    pub async fn upload_csv(&self, file: Option<CsvFile>) -> UploadOutcome {
        let outcome = self.upload.upload(file).await;

        if let UploadOutcome::Uploaded { created } = outcome {
            self.notice
                .show(Notice::uploaded(created), self.config.notice_duration);
            self.refresh().await;
        }

        outcome
    }

    /// Fetch a single transaction.
    pub async fn transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.api.get_transaction_by_id(id).await
    }

    /// The summary panels.
    pub fn summary(&self) -> &SummaryController<A> {
        &self.summary
    }

    /// The transaction list.
    pub fn transactions(&self) -> &TransactionListController<A> {
        &self.transactions
    }

    /// The upload form.
    pub fn upload(&self) -> &UploadController<A> {
        &self.upload
    }

    /// The success notice currently shown, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notice.current()
    }

    /// The settings the dashboard was created with.
    pub fn config(&self) -> DashboardConfig {
        self.config
    }
}

impl<A> FromRef<AppState<A>> for Dashboard<A> {
    fn from_ref(state: &AppState<A>) -> Self {
        state.dashboard.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        Error,
        dashboard::{Dashboard, DashboardConfig, Notice},
        test_utils::{
            FakeApi, amounts, csv_file, summary_with_totals, transaction, transaction_list,
            upload_result,
        },
        transaction_list::ListPresentation,
        upload::{UploadOutcome, UploadStatus},
    };

    fn dashboard(api: FakeApi) -> Dashboard<FakeApi> {
        Dashboard::new(api, DashboardConfig::default())
    }

    #[test]
    fn default_config() {
        let config = DashboardConfig::default();

        assert_eq!(config.page_size, 100);
        assert_eq!(config.notice_duration, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn mount_fetches_summary_and_transactions() {
        let api = FakeApi::default();
        api.push_summary(Ok(summary_with_totals(100.0, 40.0)));
        api.push_transactions(Ok(transaction_list(&[100.0, -40.0])));
        let dashboard = dashboard(api);

        dashboard.mount().await;

        let summary = dashboard.summary().state();
        assert_eq!(summary.totals().net_amount, 60.0);
        let list = dashboard.transactions().state();
        assert_eq!(amounts(&list.transactions), vec![100.0, -40.0]);
        assert_eq!(dashboard.notice(), None);
    }

    #[tokio::test]
    async fn failing_summary_does_not_block_transactions() {
        let api = FakeApi::default();
        api.push_summary(Err(Error::Transport("connection refused".to_owned())));
        api.push_transactions(Ok(transaction_list(&[1.0])));
        let dashboard = dashboard(api);

        dashboard.mount().await;

        assert!(dashboard.summary().state().error.is_some());
        let list = dashboard.transactions().state();
        assert!(matches!(list.presentation(), ListPresentation::Populated(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_upload_shows_notice_and_refetches() {
        let api = FakeApi::default();
        api.push_summary(Ok(summary_with_totals(0.0, 0.0)));
        api.push_transactions(Ok(transaction_list(&[])));
        api.push_upload(Ok(upload_result(3)));
        api.push_summary(Ok(summary_with_totals(30.0, 0.0)));
        api.push_transactions(Ok(transaction_list(&[10.0, 10.0, 10.0])));
        let dashboard = dashboard(api);
        dashboard.mount().await;

        let outcome = dashboard.upload_csv(Some(csv_file("march.csv"))).await;

        assert_eq!(outcome, UploadOutcome::Uploaded { created: 3 });
        assert_eq!(
            dashboard.notice(),
            Some(Notice {
                message: "3 transactions uploaded successfully".to_owned()
            })
        );
        assert_eq!(dashboard.summary().state().totals().total_income, 30.0);
        assert_eq!(dashboard.transactions().state().transactions.len(), 3);

        tokio::time::sleep(Duration::from_millis(3001)).await;

        assert_eq!(dashboard.notice(), None);
        assert_eq!(dashboard.upload().status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn failed_upload_shows_no_notice_and_does_not_refetch() {
        let api = FakeApi::default();
        api.push_upload(Err(Error::Transport("400 Bad Request".to_owned())));
        let dashboard = dashboard(api);

        let outcome = dashboard.upload_csv(Some(csv_file("bad.csv"))).await;

        assert_eq!(outcome, UploadOutcome::Failed);
        assert_eq!(dashboard.notice(), None);
        assert_eq!(dashboard.api.summary_calls(), 0);
        assert_eq!(dashboard.api.transactions_calls(), 0);
    }

    #[tokio::test]
    async fn fetches_single_transaction() {
        let api = FakeApi::default();
        api.push_transaction(Ok(transaction(7, -12.5)));
        let dashboard = dashboard(api);

        let got = dashboard.transaction(7).await;

        assert_eq!(got, Ok(transaction(7, -12.5)));
    }
}
