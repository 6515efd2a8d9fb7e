//! Scanlog Core Library
//!
//! This crate provides the scan record model, error types, configuration, and
//! validation helpers shared by the API client, the capture workflow and the CLI.

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, LogLevel, Permission, ScanError, ScanResult};
pub use models::{GeoFix, NewScan, ScanRecord};
pub use validation::is_url;
