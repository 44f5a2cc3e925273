//! PaySplit is a small personal-finance tracker for freelancers.
//!
//! This library provides the web client: it uploads CSV bank statements to the
//! PaySplit backend, shows the income/expense summary the backend computes and
//! lists the individual transactions. Pages are rendered on the server and
//! driven from the browser with HTMX.
//!
//! The interesting part is the set of controllers that keep the client in sync
//! with the backend: [SummaryController], [TransactionListController],
//! [UploadController] and the [Dashboard] that composes them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod load;
mod logging;
mod not_found;
mod routing;
mod summary;
mod transaction_detail;
mod transaction_list;
mod upload;

#[cfg(test)]
mod test_utils;

pub use api::{
    ApiClient, CsvFile, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, Transaction, TransactionApi,
    TransactionId, TransactionList, TransactionSummary, TransactionType, UploadResult,
};
pub use app_state::AppState;
pub use dashboard::{Dashboard, DashboardConfig, Notice, UPLOAD_NOTICE_DURATION};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{SummaryController, SummaryState};
pub use transaction_list::{SortOrder, TransactionListController, TransactionListState};
pub use upload::{UploadController, UploadOutcome, UploadStatus};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A call to the backend failed.
    ///
    /// Connection failures, timeouts, HTTP error statuses and response bodies
    /// that do not match the expected shape all end up here. The message is
    /// only meant for the logs, users are shown a generic message instead.
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The requested page does not exist.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => tracing::warn!("backend responded with {status}: {error}"),
            None => tracing::warn!("backend request failed: {error}"),
        }

        Error::Transport(error.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::NotCSV => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "File type must be CSV.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::MultipartError(details) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the uploaded file".to_owned(),
                    details,
                }
                .into_html(),
            )
                .into_response(),
            // Backend details are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
