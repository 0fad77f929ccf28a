//! Transaction persistence port trait.

use crate::domain::storage::{LoadOutcome, SaveOutcome};
use crate::domain::transaction::Transaction;
use std::path::Path;

/// Whole-collection persistence.
///
/// Neither operation fails outright: problems are reported through the
/// returned outcome and the caller keeps running.
pub trait TransactionStore {
    /// File used when the caller does not name one.
    fn default_path(&self) -> &Path;

    fn load(&self, path: &Path) -> LoadOutcome;

    fn save(&self, transactions: &[Transaction], path: &Path) -> SaveOutcome;
}
