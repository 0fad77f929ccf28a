//! Storage locations and persistence outcomes.
//!
//! Path selection is pure: given the configured default file and fallback
//! directory, these functions decide which paths a save or load should try.
//! The filesystem work lives in `adapters::json_file_store`.

use crate::domain::transaction::Transaction;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "transactions.json";

/// Where transactions are stored by default and where to fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub default_path: PathBuf,
    pub temp_dir: PathBuf,
}

impl StorageConfig {
    /// Default file `transactions.json` inside `temp_dir`.
    pub fn in_dir(temp_dir: impl Into<PathBuf>) -> Self {
        let temp_dir = temp_dir.into();
        Self {
            default_path: temp_dir.join(DEFAULT_FILE_NAME),
            temp_dir,
        }
    }

    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// The requested file's base name placed in the fallback directory.
    pub fn fallback_path(&self, requested: &Path) -> PathBuf {
        let name = requested
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.into());
        self.temp_dir.join(name)
    }

    /// Ordered, de-duplicated list of files a load should try.
    pub fn load_candidates(&self, requested: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![requested.to_path_buf()];
        if requested != self.default_path.as_path() {
            candidates.push(self.default_path.clone());
        }
        let fallback = self.fallback_path(requested);
        if !candidates.contains(&fallback) {
            candidates.push(fallback);
        }
        candidates
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir(std::env::temp_dir())
    }
}

/// Outcome of choosing a writable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub fell_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: bool,
    pub path: PathBuf,
    pub fell_back: bool,
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub transactions: Vec<Transaction>,
    /// File the transactions came from, if any candidate succeeded.
    pub source: Option<PathBuf>,
    /// One line per candidate that existed but could not be used.
    pub diagnostics: Vec<String>,
}

impl LoadOutcome {
    pub fn empty(diagnostics: Vec<String>) -> Self {
        Self {
            transactions: Vec::new(),
            source: None,
            diagnostics,
        }
    }
}
