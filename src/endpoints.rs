//! The URIs of the pages and fragments served to the browser.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the summary, upload form and transactions.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content without the page shell, rendered from the current state.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The route for uploading a CSV file.
pub const UPLOAD_CSV: &str = "/dashboard/upload";
/// The route for fetching the summary and transactions again.
pub const REFRESH_DASHBOARD: &str = "/dashboard/refresh";
/// The route for toggling the sort order of the transactions.
pub const SORT_TRANSACTIONS: &str = "/dashboard/transactions/sort";
/// The page for a single transaction.
pub const TRANSACTION_VIEW: &str = "/transactions/{transaction_id}";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";

/// Replace the first `{...}` parameter in `endpoint_path` with `id`.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end..])
}
