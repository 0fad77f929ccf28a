//! Concrete adapter implementations for ports.

pub mod ascii_chart;
pub mod file_config_adapter;
pub mod json_file_store;
