//! Balance and monthly spending aggregation.

use crate::domain::transaction::{Transaction, TransactionType};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Income, normalized expenses and their difference.
///
/// Expenses are normalized to positive magnitudes. Negative amounts on
/// non-income records are additionally accumulated in a second pass and
/// added on top, so a negative expense contributes its magnitude twice.
pub fn balance_summary(transactions: &[Transaction]) -> BalanceSummary {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();

    let expenses_pos: f64 = transactions
        .iter()
        .filter(|t| t.is_expense() && t.amount >= 0.0)
        .map(|t| t.amount)
        .sum();
    let expenses_neg: f64 = transactions
        .iter()
        .filter(|t| t.is_expense() && t.amount < 0.0)
        .map(|t| -t.amount)
        .sum();
    let other_neg: f64 = transactions
        .iter()
        .filter(|t| t.ttype != TransactionType::Income && t.amount < 0.0)
        .map(|t| -t.amount)
        .sum();

    let mut expenses = expenses_pos + expenses_neg;
    if other_neg != 0.0 {
        expenses += other_neg;
    }

    BalanceSummary {
        income,
        expenses,
        savings: income - expenses,
    }
}

/// Total expense magnitude per `YYYY-MM`, in ascending month order.
pub fn monthly_spending(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let month: String = tx.date.chars().take(7).collect();
        *totals.entry(month).or_insert(0.0) += tx.amount.abs();
    }
    totals
}
