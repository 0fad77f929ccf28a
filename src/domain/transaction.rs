//! Transaction record and collection-level mutations.

use crate::domain::error::FinanceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FinanceError::InvalidTransactionType {
                value: s.to_string(),
            }),
        }
    }
}

/// One recorded income or expense.
///
/// Field order matches the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: u64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub ttype: TransactionType,
    pub description: String,
}

impl Transaction {
    /// Parse the stored date string into a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate, FinanceError> {
        parse_date(&self.date)
    }

    pub fn is_expense(&self) -> bool {
        self.ttype == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.ttype == TransactionType::Income
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, FinanceError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FinanceError::InvalidDate {
        value: value.to_string(),
    })
}

/// A finite decimal; `inf` and `nan` are rejected since JSON cannot hold them.
pub fn parse_amount(value: &str) -> Result<f64, FinanceError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| FinanceError::InvalidAmount {
            value: value.to_string(),
        })
}

pub fn check_amount(amount: f64) -> Result<f64, FinanceError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(FinanceError::InvalidAmount {
            value: amount.to_string(),
        })
    }
}

/// max(id) + 1, or 1 for an empty collection.
pub fn next_id(transactions: &[Transaction]) -> Result<u64, FinanceError> {
    let max = transactions.iter().map(|t| t.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(FinanceError::IdOverflow { max })
}

/// Append a new transaction with the next free id and return it.
pub fn add_transaction<'a>(
    transactions: &'a mut Vec<Transaction>,
    date: &str,
    amount: f64,
    category: &str,
    ttype: TransactionType,
    description: &str,
) -> Result<&'a Transaction, FinanceError> {
    parse_date(date)?;
    check_amount(amount)?;
    let tx = Transaction {
        id: next_id(transactions)?,
        date: date.to_string(),
        amount,
        category: category.to_string(),
        ttype,
        description: description.to_string(),
    };
    transactions.push(tx);
    let last = transactions.len() - 1;
    Ok(&transactions[last])
}

/// Remove the first transaction carrying `id`, returning it.
pub fn delete_transaction(
    transactions: &mut Vec<Transaction>,
    id: u64,
) -> Result<Transaction, FinanceError> {
    let index = transactions
        .iter()
        .position(|t| t.id == id)
        .ok_or(FinanceError::NotFound { id })?;
    Ok(transactions.remove(index))
}
