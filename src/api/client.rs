//! HTTP client for the backend API.

use std::time::Duration;

use reqwest::{RequestBuilder, multipart};
use serde::de::DeserializeOwned;

use crate::{
    Error,
    api::{
        TransactionApi,
        models::{
            CsvFile, Transaction, TransactionId, TransactionList, TransactionSummary, UploadResult,
        },
    },
};

/// How long to wait for the backend before giving up on a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SUMMARY_PATH: &str = "/transactions/summary";
const TRANSACTIONS_PATH: &str = "/transactions";
const UPLOAD_PATH: &str = "/upload";

/// Talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`, e.g. "http://localhost:8000/api".
    ///
    /// # Errors
    /// Returns [Error::Transport] if the HTTP client cannot be set up.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    let response = request.send().await?.error_for_status()?;
    tracing::debug!("backend responded with {} from {}", response.status(), response.url());

    Ok(response.json::<T>().await?)
}

impl TransactionApi for ApiClient {
    async fn get_summary(&self) -> Result<TransactionSummary, Error> {
        fetch_json(self.http.get(self.url(SUMMARY_PATH))).await
    }

    async fn get_transactions(&self, limit: usize) -> Result<TransactionList, Error> {
        let request = self
            .http
            .get(self.url(TRANSACTIONS_PATH))
            .query(&[("limit", limit)]);

        fetch_json(request).await
    }

    async fn get_transaction_by_id(&self, id: TransactionId) -> Result<Transaction, Error> {
        fetch_json(self.http.get(self.url(&format!("{TRANSACTIONS_PATH}/{id}")))).await
    }

    async fn upload_csv(&self, file: CsvFile) -> Result<UploadResult, Error> {
        let size = file.bytes.len();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("text/csv")?;
        let form = multipart::Form::new().part("file", part);
        tracing::debug!("sending {size} byte CSV to the backend");

        fetch_json(self.http.post(self.url(UPLOAD_PATH)).multipart(form)).await
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, net::SocketAddr, time::Duration};

    use axum::{
        Json, Router,
        extract::{Multipart, Path, Query},
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use crate::{
        Error,
        api::{ApiClient, CsvFile, DEFAULT_PAGE_SIZE, TransactionApi},
    };

    fn transaction_json(id: i64, amount: f64) -> Value {
        json!({
            "id": id,
            "date": "2024-02-10",
            "description": format!("transaction {id}"),
            "amount": amount,
            "transaction_type": if amount < 0.0 { "Expense" } else { "Income" },
            "category": null,
            "is_business": false,
            "business_percentage": 0.0,
            "created_at": "2024-02-11T09:00:00",
            "updated_at": null
        })
    }

    async fn spawn_backend(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        addr
    }

    async fn client_for(router: Router) -> ApiClient {
        let addr = spawn_backend(router).await;
        ApiClient::new(&format!("http://{addr}/api/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trailing_slash_is_removed_from_base_url() {
        let client = ApiClient::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[tokio::test]
    async fn get_summary_parses_response() {
        let router = Router::new().route(
            "/api/transactions/summary",
            get(|| async {
                Json(json!({
                    "total_transactions": 4,
                    "total_income": 300.0,
                    "total_expenses": 120.5,
                    "net_amount": 179.5,
                    "income_count": 1,
                    "expense_count": 3
                }))
            }),
        );
        let client = client_for(router).await;

        let summary = client.get_summary().await.unwrap();

        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.net_amount, 179.5);
        assert_eq!(summary.expense_count, 3);
    }

    #[tokio::test]
    async fn get_transactions_sends_limit() {
        let router = Router::new().route(
            "/api/transactions",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let limit = params.get("limit").cloned().unwrap_or_default();
                let transactions = vec![transaction_json(1, 10.0), transaction_json(2, -3.0)];
                // Echo the limit back through the count so the test can see it.
                Json(json!({
                    "transactions": transactions,
                    "count": limit.parse::<usize>().unwrap_or(0)
                }))
            }),
        );
        let client = client_for(router).await;

        let list = client.get_transactions(DEFAULT_PAGE_SIZE).await.unwrap();

        assert_eq!(list.count, DEFAULT_PAGE_SIZE);
        assert_eq!(list.transactions.len(), 2);
        assert_eq!(list.transactions[1].amount, -3.0);
    }

    #[tokio::test]
    async fn get_transaction_by_id_uses_path() {
        let router = Router::new().route(
            "/api/transactions/{id}",
            get(|Path(id): Path<i64>| async move { Json(transaction_json(id, 42.0)) }),
        );
        let client = client_for(router).await;

        let transaction = client.get_transaction_by_id(17).await.unwrap();

        assert_eq!(transaction.id, 17);
        assert_eq!(transaction.description, "transaction 17");
    }

    #[tokio::test]
    async fn missing_transaction_is_a_transport_error() {
        let router = Router::new().route(
            "/api/transactions/{id}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))) }),
        );
        let client = client_for(router).await;

        let result = client.get_transaction_by_id(99).await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn upload_sends_file_field() {
        let router = Router::new().route(
            "/api/upload",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                assert_eq!(field.file_name(), Some("march.csv"));
                assert_eq!(field.content_type(), Some("text/csv"));
                let text = field.text().await.unwrap();
                let created = text
                    .lines()
                    .skip(1)
                    .enumerate()
                    .map(|(i, _)| transaction_json(i as i64 + 1, 5.0))
                    .collect::<Vec<_>>();

                Json(json!({"message": "CSV processed successfully", "transactions": created}))
            }),
        );
        let client = client_for(router).await;

        let result = client
            .upload_csv(CsvFile {
                file_name: "march.csv".to_owned(),
                bytes: b"Date,Description,Amount\n2024-03-01,a,1\n2024-03-02,b,2\n2024-03-03,c,3\n"
                    .to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(result.created_count(), 3);
        assert_eq!(result.message, "CSV processed successfully");
    }

    #[tokio::test]
    async fn rejected_upload_is_a_transport_error() {
        let router = Router::new().route(
            "/api/upload",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "File must be a CSV."})),
                )
            }),
        );
        let client = client_for(router).await;

        let result = client
            .upload_csv(CsvFile {
                file_name: "notes.txt".to_owned(),
                bytes: b"hello".to_vec(),
            })
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn unexpected_body_is_a_transport_error() {
        let router = Router::new().route(
            "/api/transactions/summary",
            get(|| async { "<html>not json</html>" }),
        );
        let client = client_for(router).await;

        let result = client.get_summary().await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}/api"), Duration::from_secs(1)).unwrap();

        let result = client.get_transactions(10).await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
