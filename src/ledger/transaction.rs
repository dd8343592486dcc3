use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SpendError;

/// A single ledger entry. Entries are immutable once recorded: the ledger
/// never edits or removes them in this version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Validates and builds a transaction. `date` falls back to today when
    /// the input surface leaves it blank; blank notes collapse to `None`.
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        payment_method: impl Into<String>,
        date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Result<Self, SpendError> {
        validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            category: category.into(),
            payment_method: payment_method.into(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            note: note.filter(|n| !n.trim().is_empty()),
        })
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Rejects amounts that would poison downstream sums. Zero is permitted.
pub(crate) fn validate_amount(amount: f64) -> Result<(), SpendError> {
    if !amount.is_finite() {
        return Err(SpendError::InvalidTransaction(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(SpendError::InvalidTransaction(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = SpendError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(SpendError::InvalidTransaction(format!(
                "`{other}` is not a transaction kind (expected income or expense)"
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Parses a `YYYY-MM-DD` date supplied by the input surface.
pub fn parse_date(value: &str) -> Result<NaiveDate, SpendError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| SpendError::InvalidTransaction(format!("`{value}` is not a valid date")))
}
