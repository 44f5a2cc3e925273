//! Dashboard route handlers and the dashboard content view.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, TransactionApi,
    alert::Alert,
    dashboard::Dashboard,
    endpoints,
    html::base,
    summary::summary_view,
    transaction_list::transaction_list_view,
    upload::{UploadStatus, read_csv_file, upload_view},
};

/// Render everything inside the `#dashboard` element from the current state.
///
/// While the notice is shown or the upload form is waiting to reset, the
/// element asks htmx to fetch it again once the notice has expired.
pub(crate) fn dashboard_content_view<A: TransactionApi>(dashboard: &Dashboard<A>) -> Markup {
    let notice = dashboard.notice();
    let upload_status = dashboard.upload().status();
    let summary = dashboard.summary().state();
    let transactions = dashboard.transactions().state();

    let waiting_for_timer =
        notice.is_some() || matches!(upload_status, UploadStatus::Succeeded { .. });
    let (poll_url, poll_trigger) = if waiting_for_timer {
        let delay = dashboard.config().notice_duration.as_millis();
        (
            Some(endpoints::DASHBOARD_CONTENT),
            Some(format!("load delay:{delay}ms")),
        )
    } else {
        (None, None)
    };

    html! {
        div
            id="dashboard"
            class="w-full"
            hx-get=[poll_url]
            hx-trigger=[poll_trigger]
            hx-swap="outerHTML"
        {
            @if let Some(notice) = notice {
                div id="notice" class="mb-4"
                {
                    (Alert::SuccessSimple { message: notice.message }.into_markup())
                }
            }

            (upload_view(&upload_status))
            (summary_view(&summary))
            (transaction_list_view(&transactions))
        }
    }
}

/// Fetch the latest data and display the dashboard page.
pub async fn get_dashboard_page<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
) -> Response {
    dashboard.mount().await;

    base("Dashboard", &dashboard_content_view(&dashboard)).into_response()
}

/// Display the dashboard content as it is now, without fetching anything.
pub async fn get_dashboard_content<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
) -> Response {
    dashboard_content_view(&dashboard).into_response()
}

/// Upload the CSV file from the upload form and display the updated dashboard content.
///
/// A form without a file leaves everything as it is. A file that is not a CSV
/// file is rejected with an alert.
pub async fn upload_csv_endpoint<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
    multipart: Multipart,
) -> Result<Response, Error> {
    let file = read_csv_file(multipart).await?;

    let outcome = dashboard.upload_csv(file).await;
    tracing::debug!("Upload finished: {outcome:?}");

    Ok(dashboard_content_view(&dashboard).into_response())
}

/// Fetch the summary and transactions again and display the updated dashboard content.
pub async fn refresh_dashboard_endpoint<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
) -> Response {
    dashboard.refresh().await;

    dashboard_content_view(&dashboard).into_response()
}

/// Flip the order of the transactions by amount and display the updated list.
pub async fn sort_transactions_endpoint<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
) -> Response {
    dashboard.transactions().toggle_sort();

    transaction_list_view(&dashboard.transactions().state()).into_response()
}
