use std::fmt;

use crate::Transaction;

/// The direction transactions are sorted by amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest amount first.
    Ascending,
    /// Largest amount first.
    Descending,
}

impl SortOrder {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// The arrow shown next to a column sorted in this direction.
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Sort `transactions` by amount.
///
/// The sort is stable: transactions with equal amounts keep their relative order.
pub(crate) fn sort_by_amount(transactions: &mut [Transaction], order: SortOrder) {
    transactions.sort_by(|a, b| {
        let ordering = a.amount.total_cmp(&b.amount);

        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
