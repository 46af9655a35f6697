//! Transaction records as stored in the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionKind {
    /// Kind implied by the sign of an amount when none is given.
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// A transaction before it has been given an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    /// Canonicalized category
    pub category: String,
    pub kind: TransactionKind,
}

/// A stored transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn from_new(id: u64, new: NewTransaction) -> Self {
        Self {
            id,
            date: new.date,
            amount: new.amount,
            description: new.description,
            category: new.category,
            kind: new.kind,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}
