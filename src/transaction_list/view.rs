use maud::{Markup, html};
use time::{Date, macros::format_description};

use crate::{
    Transaction,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SECONDARY_STYLE, ERROR_TEXT_STYLE, MUTED_TEXT_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, loading_spinner,
    },
    transaction_list::{
        EMPTY_LIST_MESSAGE, LOADING_LIST_MESSAGE, ListPresentation, TransactionListState,
    },
};

pub(crate) fn format_date(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| date.to_string())
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let detail_url = format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id);

    html! {
        tr id={"transaction-" (transaction.id)} class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }
            td class=(TABLE_CELL_STYLE)
            {
                a href=(detail_url) class="hover:underline" { (transaction.description) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (transaction.category.as_deref().unwrap_or("-")) }
        }
    }
}

fn transaction_table(state: &TransactionListState, transactions: &[Transaction]) -> Markup {
    let arrow = state.sort_order.map(|order| order.arrow()).unwrap_or("↕");

    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-right"}
                    {
                        button
                            id="sort-by-amount"
                            type="button"
                            hx-post=(endpoints::SORT_TRANSACTIONS)
                            hx-target="#transactions"
                            hx-swap="outerHTML"
                            title={"Sort " (state.next_sort_order())}
                            class="uppercase"
                        {
                            "Amount " (arrow)
                        }
                    }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    (transaction_row(transaction))
                }
            }
        }
    }
}

/// Render the transactions panel: a loading indicator, the error, the empty
/// state or the table.
pub(crate) fn transaction_list_view(state: &TransactionListState) -> Markup {
    html! {
        section id="transactions" class="w-full mt-8"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "All Transactions" }

                button
                    type="button"
                    hx-post=(endpoints::REFRESH_DASHBOARD)
                    hx-target="#dashboard"
                    hx-swap="outerHTML"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Refresh"
                }
            }

            @match state.presentation() {
                ListPresentation::Loading => {
                    p class={"transactions-loading " (MUTED_TEXT_STYLE)} { (loading_spinner()) (LOADING_LIST_MESSAGE) }
                }
                ListPresentation::Failed(error) => {
                    p class={"transactions-error " (ERROR_TEXT_STYLE)} { (error) }
                }
                ListPresentation::Empty => {
                    p class={"transactions-empty " (MUTED_TEXT_STYLE)} { (EMPTY_LIST_MESSAGE) }
                }
                ListPresentation::Populated(transactions) => {
                    div class="relative overflow-x-auto shadow-md rounded-lg"
                    {
                        (transaction_table(state, transactions))
                    }
                }
            }
        }
    }
}
