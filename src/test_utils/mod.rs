#![allow(missing_docs)]

pub(crate) mod fake_api;
pub(crate) mod fixtures;
pub(crate) mod html;

pub(crate) use fake_api::FakeApi;
pub(crate) use fixtures::{
    amounts, csv_file, summary_with_totals, transaction, transaction_list,
    transactions_with_amounts, upload_result,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
