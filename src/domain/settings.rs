//! Process-wide settings, built once at startup.

use crate::domain::storage::StorageConfig;
use std::path::Path;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub log_level: String,
}

impl AppConfig {
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// File that save and load target unless a command names another.
    pub fn data_file(&self) -> &Path {
        &self.storage.default_path
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}
