use maud::{Markup, html};

use crate::{
    html::{ERROR_TEXT_STYLE, MUTED_TEXT_STYLE, format_currency, loading_spinner},
    summary::SummaryState,
};

fn panel(id: &str, title: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div
            id=(id)
            class="summary-panel flex-1 bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md text-center"
        {
            h4 class="text-sm font-semibold uppercase text-gray-500 dark:text-gray-400" { (title) }
            p class={"text-2xl font-bold " (amount_style)} { (format_currency(amount)) }
        }
    }
}

/// Render the three summary panels: income, expenses and net.
pub(crate) fn summary_view(state: &SummaryState) -> Markup {
    let totals = state.totals();
    let net_style = if totals.net_amount < 0.0 {
        "text-red-600"
    } else {
        "text-green-600"
    };

    html! {
        section id="summary" class="w-full mb-8"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Financial Summary" }

                @if state.is_loading() {
                    span class={"summary-loading " (MUTED_TEXT_STYLE)} { (loading_spinner()) "Loading..." }
                }
            }

            div class="flex flex-col sm:flex-row gap-4"
            {
                (panel("total-income", "Total Income", totals.total_income, "text-green-600"))
                (panel("total-expenses", "Total Expenses", totals.total_expenses, "text-red-600"))
                (panel("net-amount", "Net Amount", totals.net_amount, net_style))
            }

            @if let Some(error) = state.error {
                p class={"summary-error mt-2 " (ERROR_TEXT_STYLE)} { "Error: " (error) }
            }
        }
    }
}
