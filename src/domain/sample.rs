//! Demo data set used by `pftrack demo`, `pftrack seed` and the menu.

use crate::domain::error::FinanceError;
use crate::domain::transaction::{add_transaction, Transaction, TransactionType};

const SAMPLE: &[(&str, f64, &str, TransactionType, &str)] = &[
    ("2025-01-03", 3000.00, "Salary", TransactionType::Income, "Monthly salary"),
    ("2025-01-05", 45.20, "Groceries", TransactionType::Expense, "Walmart shopping"),
    ("2025-01-10", 120.00, "Utilities", TransactionType::Expense, "Electricity bill"),
    ("2025-02-01", 3000.00, "Salary", TransactionType::Income, "Monthly salary"),
    ("2025-02-12", 250.00, "Shopping", TransactionType::Expense, "New jacket"),
    ("2025-02-20", 12.00, "Coffee", TransactionType::Expense, "Coffee shop"),
    ("2025-03-01", 3000.00, "Salary", TransactionType::Income, "Monthly salary"),
    ("2025-03-14", 600.00, "Rent", TransactionType::Expense, "March rent"),
];

/// Eight transactions spanning January to March 2025, ids 1 through 8.
pub fn sample_data() -> Result<Vec<Transaction>, FinanceError> {
    let mut txs = Vec::with_capacity(SAMPLE.len());
    for &(date, amount, category, ttype, description) in SAMPLE {
        add_transaction(&mut txs, date, amount, category, ttype, description)?;
    }
    Ok(txs)
}
