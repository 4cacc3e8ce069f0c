//! Inventory domain module.
//!
//! Business rules for scanned stock, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod inventory;
pub mod product;
pub mod record;

pub use inventory::Inventory;
pub use product::{ProductInfo, UNKNOWN};
pub use record::Record;
