//! JSON file transaction store with temp-directory fallback.
//!
//! Saving probes the target directory first and falls back to the configured
//! temp directory if the probe fails. Loading walks an ordered candidate list
//! and takes the first file that reads and parses.

use crate::domain::error::FinanceError;
use crate::domain::storage::{LoadOutcome, ResolvedPath, SaveOutcome, StorageConfig};
use crate::domain::transaction::{check_amount, Transaction, TransactionType};
use crate::ports::store_port::TransactionStore;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

const PROBE_FILE_NAME: &str = ".pft_write_test";

pub struct JsonFileStore {
    config: StorageConfig,
}

impl JsonFileStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Pick `requested` if its directory accepts writes, otherwise the
    /// fallback of the same name in the temp directory.
    pub fn resolve_writable(&self, requested: &Path) -> ResolvedPath {
        match probe_dir(parent_dir(requested)) {
            Ok(()) => ResolvedPath {
                path: requested.to_path_buf(),
                fell_back: false,
            },
            Err(e) => {
                let path = self.config.fallback_path(requested);
                debug!(
                    "write probe failed for {}: {e}; using {}",
                    requested.display(),
                    path.display()
                );
                ResolvedPath {
                    fell_back: path != requested,
                    path,
                }
            }
        }
    }
}

impl TransactionStore for JsonFileStore {
    fn default_path(&self) -> &Path {
        &self.config.default_path
    }

    fn load(&self, path: &Path) -> LoadOutcome {
        let mut diagnostics = Vec::new();
        for candidate in self.config.load_candidates(path) {
            if !candidate.exists() {
                debug!("no transaction file at {}", candidate.display());
                continue;
            }
            match read_file(&candidate) {
                Ok(transactions) => {
                    info!(
                        "loaded {} transactions from {}",
                        transactions.len(),
                        candidate.display()
                    );
                    return LoadOutcome {
                        transactions,
                        source: Some(candidate),
                        diagnostics,
                    };
                }
                Err(e) => {
                    warn!("{e}");
                    diagnostics.push(e.to_string());
                }
            }
        }
        LoadOutcome::empty(diagnostics)
    }

    fn save(&self, transactions: &[Transaction], path: &Path) -> SaveOutcome {
        let resolved = self.resolve_writable(path);
        match write_file(&resolved.path, transactions) {
            Ok(()) => {
                let diagnostic = resolved.fell_back.then(|| {
                    format!(
                        "save path '{}' not writable; saved to '{}' instead",
                        path.display(),
                        resolved.path.display()
                    )
                });
                if let Some(msg) = &diagnostic {
                    info!("{msg}");
                }
                debug!(
                    "saved {} transactions to {}",
                    transactions.len(),
                    resolved.path.display()
                );
                SaveOutcome {
                    saved: true,
                    path: resolved.path,
                    fell_back: resolved.fell_back,
                    diagnostic,
                }
            }
            Err(e) => {
                let msg = format!("could not save transactions: {e}");
                warn!("{msg}");
                SaveOutcome {
                    saved: false,
                    path: resolved.path,
                    fell_back: resolved.fell_back,
                    diagnostic: Some(msg),
                }
            }
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn probe_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let probe = dir.join(PROBE_FILE_NAME);
    fs::File::create(&probe)?;
    fs::remove_file(&probe)
}

fn write_file(path: &Path, transactions: &[Transaction]) -> Result<(), FinanceError> {
    let json = to_json(transactions)?;
    fs::write(path, json).map_err(|e| FinanceError::io(path, e))
}

fn read_file(path: &Path) -> Result<Vec<Transaction>, FinanceError> {
    let content = fs::read_to_string(path).map_err(|e| FinanceError::io(path, e))?;
    from_json(&content).map_err(|reason| FinanceError::Parse {
        path: path.display().to_string(),
        reason,
    })
}

/// Pretty-printed JSON array, two-space indent.
///
/// Non-finite amounts are refused; serde_json would write them as `null`
/// and the file would no longer load.
pub fn to_json(transactions: &[Transaction]) -> Result<String, FinanceError> {
    for tx in transactions {
        check_amount(tx.amount)?;
    }
    serde_json::to_string_pretty(transactions).map_err(|e| FinanceError::Parse {
        path: "<memory>".into(),
        reason: e.to_string(),
    })
}

/// Parse a persisted array, applying field defaults and coercions.
pub fn from_json(content: &str) -> Result<Vec<Transaction>, String> {
    let stored: Vec<StoredTransaction> =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
    stored
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_transaction().map_err(|e| format!("record {i}: {e}")))
        .collect()
}

/// Largest id a JSON float carries exactly.
const MAX_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// A number that may have been written as a JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    U64(u64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Positive integral id; floats only when exact.
    fn to_id(&self) -> Result<u64, String> {
        let id = match self {
            Numeric::Int(n) => u64::try_from(*n).ok(),
            Numeric::U64(n) => Some(*n),
            Numeric::Float(f) if f.fract() == 0.0 && (1.0..=MAX_FLOAT_ID).contains(f) => Some(*f as u64),
            Numeric::Float(_) => None,
            Numeric::Text(s) => s.trim().parse::<u64>().ok(),
        };
        id.filter(|&id| id > 0)
            .ok_or_else(|| format!("invalid id {self:?}"))
    }

    fn to_amount(&self) -> Result<f64, String> {
        let amount = match self {
            Numeric::Int(n) => Some(*n as f64),
            Numeric::U64(n) => Some(*n as f64),
            Numeric::Float(f) => Some(*f),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        };
        amount
            .filter(|a| a.is_finite())
            .ok_or_else(|| format!("invalid amount {self:?}"))
    }
}

#[derive(Debug, Deserialize)]
struct StoredTransaction {
    id: Numeric,
    date: String,
    amount: Numeric,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    ttype: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl StoredTransaction {
    fn into_transaction(self) -> Result<Transaction, String> {
        let ttype = match self.ttype.as_deref() {
            None => TransactionType::Expense,
            Some(s) => s.parse::<TransactionType>().map_err(|e| e.to_string())?,
        };
        Ok(Transaction {
            id: self.id.to_id()?,
            date: self.date,
            amount: self.amount.to_amount()?,
            category: self.category.unwrap_or_default(),
            ttype,
            description: self.description.unwrap_or_default(),
        })
    }
}
