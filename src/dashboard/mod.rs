//! The dashboard page: the upload form, the financial summary and the list of
//! transactions, kept in step with each other.

mod coordinator;
mod handlers;
mod notice;

pub use coordinator::{Dashboard, DashboardConfig, UPLOAD_NOTICE_DURATION};
pub use handlers::{
    get_dashboard_content, get_dashboard_page, refresh_dashboard_endpoint,
    sort_transactions_endpoint, upload_csv_endpoint,
};
pub use notice::Notice;
