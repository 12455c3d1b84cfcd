use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    /// Parse a user-supplied kind. Only the two exact words are accepted.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single dated income or expense entry. The whole collection is persisted
/// as one JSON array, so every field round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub amount: Decimal,
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`; the only time dimension in the model.
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }

    /// Description for display; an empty description falls back to the
    /// category's label (or the raw code when the code is unknown).
    pub(crate) fn display_description(&self) -> &str {
        if self.description.is_empty() {
            category::label_of(&self.category)
        } else {
            &self.description
        }
    }
}
