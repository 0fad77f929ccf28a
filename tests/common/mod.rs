#![allow(dead_code)]

use pftrack::domain::storage::{LoadOutcome, SaveOutcome};
pub use pftrack::domain::transaction::{Transaction, TransactionType};
use pftrack::ports::store_port::TransactionStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory store keyed by path.
pub struct MockStore {
    pub default_path: PathBuf,
    pub files: RefCell<HashMap<PathBuf, Vec<Transaction>>>,
    pub fail_saves: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            default_path: PathBuf::from("/mock/transactions.json"),
            files: RefCell::new(HashMap::new()),
            fail_saves: false,
        }
    }

    pub fn with_file(self, path: impl Into<PathBuf>, txs: Vec<Transaction>) -> Self {
        self.files.borrow_mut().insert(path.into(), txs);
        self
    }

    pub fn with_default(self, txs: Vec<Transaction>) -> Self {
        let path = self.default_path.clone();
        self.with_file(path, txs)
    }

    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<Transaction>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl TransactionStore for MockStore {
    fn default_path(&self) -> &Path {
        &self.default_path
    }

    fn load(&self, path: &Path) -> LoadOutcome {
        match self.files.borrow().get(path) {
            Some(txs) => LoadOutcome {
                transactions: txs.clone(),
                source: Some(path.to_path_buf()),
                diagnostics: Vec::new(),
            },
            None => LoadOutcome::empty(Vec::new()),
        }
    }

    fn save(&self, transactions: &[Transaction], path: &Path) -> SaveOutcome {
        if self.fail_saves {
            return SaveOutcome {
                saved: false,
                path: path.to_path_buf(),
                fell_back: false,
                diagnostic: Some("disk full".into()),
            };
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), transactions.to_vec());
        SaveOutcome {
            saved: true,
            path: path.to_path_buf(),
            fell_back: false,
            diagnostic: None,
        }
    }
}

pub fn make_tx(id: u64, date: &str, amount: f64, category: &str, ttype: TransactionType) -> Transaction {
    Transaction {
        id,
        date: date.to_string(),
        amount,
        category: category.to_string(),
        ttype,
        description: String::new(),
    }
}

pub fn expense(id: u64, date: &str, amount: f64) -> Transaction {
    make_tx(id, date, amount, "Misc", TransactionType::Expense)
}

pub fn income(id: u64, date: &str, amount: f64) -> Transaction {
    make_tx(id, date, amount, "Salary", TransactionType::Income)
}

pub fn ids(txs: &[Transaction]) -> Vec<u64> {
    txs.iter().map(|t| t.id).collect()
}
