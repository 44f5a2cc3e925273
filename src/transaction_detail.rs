//! The page that shows everything the backend knows about one transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, macros::format_description};

use crate::{
    Dashboard, Transaction, TransactionApi, TransactionId, endpoints,
    html::{BUTTON_SECONDARY_STYLE, ERROR_TEXT_STYLE, base, format_currency},
    transaction_list::format_date,
};

/// Shown when the transaction could not be fetched.
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load transaction";

fn format_timestamp(timestamp: Option<OffsetDateTime>) -> String {
    match timestamp {
        Some(timestamp) => timestamp
            .format(format_description!(
                "[day]/[month]/[year] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| timestamp.to_string()),
        None => "-".to_owned(),
    }
}

fn detail_row(label: &str, value: Markup) -> Markup {
    html! {
        div class="flex justify-between py-2 border-b border-gray-200 dark:border-gray-700"
        {
            dt class="font-medium text-gray-500 dark:text-gray-400" { (label) }
            dd { (value) }
        }
    }
}

fn transaction_detail_view(transaction: &Transaction) -> Markup {
    html! {
        dl id="transaction-detail" class="w-full max-w-md"
        {
            (detail_row("Date", html! { (format_date(transaction.date)) }))
            (detail_row("Description", html! { (transaction.description) }))
            (detail_row("Amount", html! { (format_currency(transaction.amount)) }))
            (detail_row("Type", html! { (transaction.transaction_type) }))
            (detail_row("Category", html! { (transaction.category.as_deref().unwrap_or("-")) }))
            (detail_row("Business", html! { @if transaction.is_business { "Yes" } @else { "No" } }))
            (detail_row("Business percentage", html! { (transaction.business_percentage) "%" }))
            (detail_row("Created", html! { (format_timestamp(transaction.created_at)) }))
            (detail_row("Updated", html! { (format_timestamp(transaction.updated_at)) }))
        }
    }
}

fn detail_page(transaction_id: TransactionId, transaction: Option<&Transaction>) -> Markup {
    let content = html! {
        section class="w-full flex flex-col items-center"
        {
            h2 class="text-2xl font-semibold mb-6" { "Transaction #" (transaction_id) }

            @match transaction {
                Some(transaction) => {
                    (transaction_detail_view(transaction))
                }
                None => {
                    p class={"transaction-error " (ERROR_TEXT_STYLE)} { (DETAIL_ERROR_MESSAGE) }
                }
            }

            a href=(endpoints::DASHBOARD_VIEW) class={"mt-6 " (BUTTON_SECONDARY_STYLE)}
            {
                "Back to Dashboard"
            }
        }
    };

    base("Transaction", &content)
}

/// Display the page for a single transaction.
///
/// Any failure to fetch the transaction is shown on the page itself.
pub async fn get_transaction_page<A: TransactionApi>(
    State(dashboard): State<Dashboard<A>>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match dashboard.transaction(transaction_id).await {
        Ok(transaction) => detail_page(transaction_id, Some(&transaction)).into_response(),
        Err(error) => {
            tracing::error!("Could not load transaction {transaction_id}: {error}");
            detail_page(transaction_id, None).into_response()
        }
    }
}
