//! Sorting, searching and filtering over a transaction collection.
//!
//! Every function here borrows the collection and returns a new view;
//! nothing mutates the input.

use crate::domain::error::FinanceError;
use crate::domain::transaction::Transaction;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    ById,
    ByDate,
    ByAmount,
    ByCategory,
}

impl FromStr for SortKey {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "id" => Ok(SortKey::ById),
            "date" => Ok(SortKey::ByDate),
            "amount" => Ok(SortKey::ByAmount),
            "category" => Ok(SortKey::ByCategory),
            _ => Err(FinanceError::InvalidSortKey {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::ById => "id",
            SortKey::ByDate => "date",
            SortKey::ByAmount => "amount",
            SortKey::ByCategory => "category",
        };
        f.write_str(name)
    }
}

/// Precomputed per-record sort key.
enum KeyValue {
    Id(u64),
    Date(NaiveDate),
    Amount(f64),
    Category(String),
}

impl SortKey {
    fn key_of(&self, tx: &Transaction) -> Result<KeyValue, FinanceError> {
        Ok(match self {
            SortKey::ById => KeyValue::Id(tx.id),
            SortKey::ByDate => KeyValue::Date(tx.parsed_date()?),
            SortKey::ByAmount => KeyValue::Amount(tx.amount),
            SortKey::ByCategory => KeyValue::Category(tx.category.to_lowercase()),
        })
    }
}

fn compare_keys(a: &KeyValue, b: &KeyValue) -> Ordering {
    match (a, b) {
        (KeyValue::Id(x), KeyValue::Id(y)) => x.cmp(y),
        (KeyValue::Date(x), KeyValue::Date(y)) => x.cmp(y),
        (KeyValue::Amount(x), KeyValue::Amount(y)) => x.total_cmp(y),
        (KeyValue::Category(x), KeyValue::Category(y)) => x.cmp(y),
        // Keys within one call always share a variant.
        _ => Ordering::Equal,
    }
}

/// Return the collection ordered by `sort_key`.
///
/// The sort is stable. With `reverse` the comparator is inverted, so equal
/// keys still keep their original relative order. Sorting by date fails the
/// whole call if any record carries an unparsable date.
pub fn list_sorted(
    transactions: &[Transaction],
    sort_key: SortKey,
    reverse: bool,
) -> Result<Vec<&Transaction>, FinanceError> {
    let mut keyed = transactions
        .iter()
        .map(|tx| sort_key.key_of(tx).map(|key| (key, tx)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = compare_keys(a, b);
        if reverse { ord.reverse() } else { ord }
    });

    Ok(keyed.into_iter().map(|(_, tx)| tx).collect())
}

pub fn find_by_id(transactions: &[Transaction], id: u64) -> Option<&Transaction> {
    transactions.iter().find(|t| t.id == id)
}

/// Case-insensitive substring match on description or category.
pub fn search<'a>(transactions: &'a [Transaction], keyword: &str) -> Vec<&'a Transaction> {
    let kw = keyword.to_lowercase();
    transactions
        .iter()
        .filter(|t| t.description.to_lowercase().contains(&kw) || t.category.to_lowercase().contains(&kw))
        .collect()
}

/// Expenses whose magnitude is strictly above `threshold`.
pub fn filter_expenses_over(transactions: &[Transaction], threshold: f64) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.amount.abs() > threshold)
        .collect()
}

pub fn filter_by_category<'a>(transactions: &'a [Transaction], category: &str) -> Vec<&'a Transaction> {
    let wanted = category.to_lowercase();
    transactions
        .iter()
        .filter(|t| t.category.to_lowercase() == wanted)
        .collect()
}

/// Records dated within `[start, end]`; a missing bound is open.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<&Transaction>, FinanceError> {
    let mut out = Vec::new();
    for tx in transactions {
        let date = tx.parsed_date()?;
        if start.is_some_and(|s| date < s) {
            continue;
        }
        if end.is_some_and(|e| date > e) {
            continue;
        }
        out.push(tx);
    }
    Ok(out)
}
