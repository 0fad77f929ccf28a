//! Core domain types and logic.

pub mod transaction;
pub mod query;
pub mod report;
pub mod storage;
pub mod settings;
pub mod sample;
pub mod error;
