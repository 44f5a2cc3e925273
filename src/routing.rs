//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::{
    AppState, TransactionApi,
    dashboard::{
        get_dashboard_content, get_dashboard_page, refresh_dashboard_endpoint,
        sort_transactions_endpoint, upload_csv_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    transaction_detail::get_transaction_page,
};

/// Return a router with all the app's routes.
pub fn build_router<A: TransactionApi>(state: AppState<A>) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page::<A>))
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content::<A>))
        .route(endpoints::UPLOAD_CSV, post(upload_csv_endpoint::<A>))
        .route(
            endpoints::REFRESH_DASHBOARD,
            post(refresh_dashboard_endpoint::<A>),
        )
        .route(
            endpoints::SORT_TRANSACTIONS,
            post(sort_transactions_endpoint::<A>),
        )
        .route(endpoints::TRANSACTION_VIEW, get(get_transaction_page::<A>))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
