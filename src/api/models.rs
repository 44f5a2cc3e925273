//! The records exchanged with the backend.

use std::fmt;

use serde::{Deserialize, Deserializer, de};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
};

/// The backend-assigned identifier of a transaction.
pub type TransactionId = i64;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

/// A single bank transaction as stored by the backend.
///
/// The client displays these as received. In particular the sign of `amount`
/// is not checked against `transaction_type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// The ID the backend assigned to the transaction.
    pub id: TransactionId,
    /// The date the transaction happened.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Date,
    /// The text from the bank statement.
    pub description: String,
    /// The amount in currency units.
    pub amount: f64,
    /// Whether this is income or an expense.
    pub transaction_type: TransactionType,
    /// The category, if the backend has assigned one.
    pub category: Option<String>,
    /// Whether the transaction is a business transaction.
    #[serde(default)]
    pub is_business: bool,
    /// The share of the transaction that counts as business, as sent by the backend.
    #[serde(default)]
    pub business_percentage: f64,
    /// When the backend created the record.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<OffsetDateTime>,
    /// When the backend last updated the record.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Totals over all transactions, computed by the backend.
///
/// The default value is the all-zero summary shown before anything has loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionSummary {
    /// The number of transactions.
    pub total_transactions: u64,
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub net_amount: f64,
    /// The number of income transactions.
    pub income_count: u64,
    /// The number of expense transactions.
    pub expense_count: u64,
}

/// A page of transactions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionList {
    /// The transactions in the order the backend returned them.
    pub transactions: Vec<Transaction>,
    /// The number of transactions in `transactions`.
    pub count: usize,
}

/// The backend's response to a CSV upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    /// A human readable status message.
    pub message: String,
    /// One entry per transaction created from the uploaded file.
    ///
    /// Only the number of entries is used. Their shape differs between backend
    /// versions, so they are not decoded.
    pub transactions: Vec<de::IgnoredAny>,
}

impl UploadResult {
    /// The number of transactions the upload created.
    pub fn created_count(&self) -> usize {
        self.transactions.len()
    }
}

/// A CSV file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    /// The file name as reported by the browser.
    pub file_name: String,
    /// The raw file contents.
    pub bytes: Vec<u8>,
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text).map_err(de::Error::custom)
}

/// Parse the calendar date at the start of an ISO 8601 date or date-time string.
pub(crate) fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    let date = text.get(..10).unwrap_or(text);
    Date::parse(date, format_description!("[year]-[month]-[day]"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse_timestamp(&text).map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Parse an RFC 3339 timestamp, or an ISO 8601 date-time without an offset,
/// which is taken to be UTC.
pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339).or_else(|_| {
        PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc)
    })
}
