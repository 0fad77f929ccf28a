//! Property-based tests for the query and report functions.
//!
//! These check invariants that hold for any collection of well-formed
//! transactions.

mod common;

use common::*;
use pftrack::domain::query::{self, SortKey};
use pftrack::domain::report::{balance_summary, monthly_spending};
use pftrack::domain::transaction::{add_transaction, delete_transaction};
use proptest::prelude::*;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

fn arb_date() -> impl Strategy<Value = String> {
    (2020i32..=2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Amounts in cents so sums stay well within exact f64 range.
fn arb_amount() -> impl Strategy<Value = f64> {
    (-100_000i64..=1_000_000i64).prop_map(|cents| cents as f64 / 100.0)
}

fn arb_ttype() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Income), Just(TransactionType::Expense)]
}

fn arb_category() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Salary", "Groceries", "Rent", "Coffee", "Misc"]).prop_map(String::from)
}

/// Collections with unique ids 1..=n in insertion order.
fn arb_transactions() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((arb_date(), arb_amount(), arb_category(), arb_ttype()), 0..30).prop_map(
        |rows| {
            rows.into_iter()
                .zip(1u64..)
                .map(|((date, amount, category, ttype), id)| make_tx(id, &date, amount, &category, ttype))
                .collect()
        },
    )
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::ById),
        Just(SortKey::ByDate),
        Just(SortKey::ByAmount),
        Just(SortKey::ByCategory),
    ]
}

// =============================================================================
// Query Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Sorting returns every record exactly once.
    #[test]
    fn sort_is_a_permutation(txs in arb_transactions(), key in arb_sort_key(), reverse in any::<bool>()) {
        let sorted = query::list_sorted(&txs, key, reverse).unwrap();
        let mut got: Vec<u64> = sorted.iter().map(|t| t.id).collect();
        got.sort_unstable();
        prop_assert_eq!(got, ids(&txs));
    }

    /// Id order is ascending, reversed id order is descending.
    #[test]
    fn id_sort_is_monotonic(txs in arb_transactions(), reverse in any::<bool>()) {
        let sorted = query::list_sorted(&txs, SortKey::ById, reverse).unwrap();
        for pair in sorted.windows(2) {
            if reverse {
                prop_assert!(pair[0].id >= pair[1].id);
            } else {
                prop_assert!(pair[0].id <= pair[1].id);
            }
        }
    }

    /// Amount order is non-decreasing.
    #[test]
    fn amount_sort_is_non_decreasing(txs in arb_transactions()) {
        let sorted = query::list_sorted(&txs, SortKey::ByAmount, false).unwrap();
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].amount <= pair[1].amount);
        }
    }

    /// An empty keyword matches every record.
    #[test]
    fn empty_search_matches_all(txs in arb_transactions()) {
        prop_assert_eq!(query::search(&txs, "").len(), txs.len());
    }

    /// Only expenses strictly above the threshold survive.
    #[test]
    fn expenses_over_threshold_are_strict(txs in arb_transactions(), threshold in arb_amount()) {
        let over = query::filter_expenses_over(&txs, threshold);
        prop_assert!(over.len() <= txs.len());
        for t in &over {
            prop_assert!(t.is_expense());
            prop_assert!(t.amount.abs() > threshold);
        }
        let expected = txs
            .iter()
            .filter(|t| t.is_expense() && t.amount.abs() > threshold)
            .count();
        prop_assert_eq!(over.len(), expected);
    }

    /// An open range keeps every record.
    #[test]
    fn unbounded_range_returns_everything(txs in arb_transactions()) {
        let all = query::filter_by_date_range(&txs, None, None).unwrap();
        prop_assert_eq!(all.len(), txs.len());
    }

    /// Each id is found and resolves to its own record.
    #[test]
    fn find_by_id_resolves_every_id(txs in arb_transactions()) {
        for t in &txs {
            prop_assert_eq!(query::find_by_id(&txs, t.id), Some(t));
        }
        let missing = txs.len() as u64 + 1;
        prop_assert!(query::find_by_id(&txs, missing).is_none());
    }
}

// =============================================================================
// Mutation and Report Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Adding then deleting the new record leaves the collection unchanged.
    #[test]
    fn add_then_delete_is_identity(
        txs in arb_transactions(),
        date in arb_date(),
        amount in arb_amount(),
        ttype in arb_ttype(),
    ) {
        let mut working = txs.clone();
        let id = add_transaction(&mut working, &date, amount, "Misc", ttype, "").unwrap().id;
        prop_assert_eq!(id, txs.len() as u64 + 1);
        delete_transaction(&mut working, id).unwrap();
        prop_assert_eq!(working, txs);
    }

    /// Monthly totals are non-negative and exist only for months with expenses.
    #[test]
    fn monthly_totals_cover_expense_months(txs in arb_transactions()) {
        let totals = monthly_spending(&txs);
        for (month, total) in &totals {
            prop_assert!(*total >= 0.0);
            prop_assert!(txs.iter().any(|t| t.is_expense() && t.date.starts_with(month.as_str())));
        }
        for t in txs.iter().filter(|t| t.is_expense()) {
            prop_assert!(totals.contains_key(&t.date[..7]));
        }
    }

    /// Savings is income less expenses.
    #[test]
    fn savings_is_income_minus_expenses(txs in arb_transactions()) {
        let s = balance_summary(&txs);
        prop_assert!((s.savings - (s.income - s.expenses)).abs() < 1e-6);
    }
}
