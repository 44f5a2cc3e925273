//! The income, expenses and net totals shown at the top of the dashboard.

mod controller;
mod view;

pub use controller::{SummaryController, SummaryState};
pub(crate) use view::summary_view;
