use serde::de::IgnoredAny;
use time::macros::date;

use crate::{
    CsvFile, Transaction, TransactionId, TransactionList, TransactionSummary, TransactionType,
    UploadResult,
};

/// A transaction dated 2025-03-01. Negative amounts are expenses.
pub(crate) fn transaction(id: TransactionId, amount: f64) -> Transaction {
    Transaction {
        id,
        date: date!(2025 - 03 - 01),
        description: format!("Transaction {id}"),
        amount,
        transaction_type: if amount < 0.0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        },
        category: None,
        is_business: false,
        business_percentage: 0.0,
        created_at: None,
        updated_at: None,
    }
}

/// One transaction per amount, with IDs counting up from 1.
pub(crate) fn transactions_with_amounts(amounts: &[f64]) -> Vec<Transaction> {
    amounts
        .iter()
        .zip(1..)
        .map(|(&amount, id)| transaction(id, amount))
        .collect()
}

pub(crate) fn transaction_list(amounts: &[f64]) -> TransactionList {
    let transactions = transactions_with_amounts(amounts);

    TransactionList {
        count: transactions.len(),
        transactions,
    }
}

pub(crate) fn amounts(transactions: &[Transaction]) -> Vec<f64> {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .collect()
}

pub(crate) fn summary_with_totals(income: f64, expenses: f64) -> TransactionSummary {
    let income_count = u64::from(income != 0.0);
    let expense_count = u64::from(expenses != 0.0);

    TransactionSummary {
        total_transactions: income_count + expense_count,
        total_income: income,
        total_expenses: expenses,
        net_amount: income - expenses,
        income_count,
        expense_count,
    }
}

/// The backend's answer to an upload that created `created` transactions.
pub(crate) fn upload_result(created: usize) -> UploadResult {
    UploadResult {
        message: format!("Successfully uploaded {created} transactions"),
        transactions: vec![IgnoredAny; created],
    }
}

pub(crate) fn csv_file(file_name: &str) -> CsvFile {
    CsvFile {
        file_name: file_name.to_owned(),
        bytes: b"date,description,amount\n2025-03-01,Coffee,-4.5\n".to_vec(),
    }
}
