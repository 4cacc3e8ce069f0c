//! Infrastructure layer: durable storage, external services, orchestration, config.

pub mod catalog;
pub mod config;
pub mod decoder;
pub mod notify;
pub mod reconciliation;
pub mod store;

pub use reconciliation::{ReconciliationService, ScanError, ScanResult};
