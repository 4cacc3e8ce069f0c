//! `stockscan-core`: shared domain primitives.
//!
//! This crate contains **pure domain** building blocks (no IO, no HTTP, no storage).

pub mod barcode;
pub mod entity;
pub mod error;

pub use barcode::Barcode;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
