//! Filter & sort engine: narrows the collection to the reference month,
//! applies the type and category selections, and orders the result for
//! display (newest first).

use chrono::{Datelike, NaiveDate};

use super::DATE_FMT;
use crate::models::{Transaction, TxnKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Parse a filter selection ("all" | "income" | "expense").
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.kind == TxnKind::Income,
            Self::Expense => txn.kind == TxnKind::Expense,
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum CategoryFilter {
    #[default]
    All,
    Code(String),
}

impl CategoryFilter {
    fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Code(code) => txn.category == *code,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

fn in_month(txn: &Transaction, reference: NaiveDate) -> bool {
    NaiveDate::parse_from_str(&txn.date, DATE_FMT)
        .is_ok_and(|d| d.year() == reference.year() && d.month() == reference.month())
}

/// Transactions of the reference date's calendar month matching both
/// filters, sorted by date descending. The sort is stable, so same-day
/// entries keep their insertion order. An empty result is a normal outcome.
pub(crate) fn select_transactions(
    txns: &[Transaction],
    reference: NaiveDate,
    type_filter: TypeFilter,
    category_filter: &CategoryFilter,
) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = txns
        .iter()
        .filter(|t| in_month(t, reference))
        .filter(|t| type_filter.matches(t))
        .filter(|t| category_filter.matches(t))
        .cloned()
        .collect();
    // Zero-padded ISO dates order lexicographically like calendar dates.
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}
