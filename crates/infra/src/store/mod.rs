//! Durable inventory storage.
//!
//! Storage is split in two layers:
//! - [`InventoryMedium`]: loads and saves the *whole* inventory (CSV file, memory).
//! - [`InventoryStore`]: the read-modify-write cycle on top of a medium,
//!   serialized by a single store-wide lock.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use stockscan_core::Barcode;
use stockscan_inventory::{Inventory, ProductInfo, Record};

pub mod csv_file;
pub mod in_memory;

pub use csv_file::CsvInventoryFile;
pub use in_memory::InMemoryMedium;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The medium could not be read or written.
    #[error("inventory storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// The medium was readable but its contents are not a valid inventory.
    #[error("inventory storage is malformed: {0}")]
    Format(String),
}

impl StoreError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

/// Whole-inventory persistence.
///
/// `save` must replace the previous contents atomically: a failed save leaves
/// the old inventory in place.
pub trait InventoryMedium: Send + Sync {
    fn load(&self) -> Result<Inventory, StoreError>;
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError>;
}

impl<M> InventoryMedium for Arc<M>
where
    M: InventoryMedium + ?Sized,
{
    fn load(&self) -> Result<Inventory, StoreError> {
        (**self).load()
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        (**self).save(inventory)
    }
}

/// Inventory store: point reads, listings and the single mutating operation.
///
/// Every operation goes through one async mutex, held across the full
/// load → (catalog fallback) → save cycle of [`InventoryStore::upsert_increment`].
/// Two concurrent scans can therefore neither lose an increment nor create the
/// same barcode twice.
#[derive(Debug)]
pub struct InventoryStore<M> {
    medium: Mutex<M>,
}

impl<M> InventoryStore<M>
where
    M: InventoryMedium,
{
    pub fn new(medium: M) -> Self {
        Self {
            medium: Mutex::new(medium),
        }
    }

    pub async fn get(&self, barcode: &Barcode) -> Result<Option<Record>, StoreError> {
        let medium = self.medium.lock().await;
        Ok(medium.load()?.get(barcode).cloned())
    }

    /// All records in first-sighting order.
    pub async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let medium = self.medium.lock().await;
        Ok(medium.load()?.into_records())
    }

    /// Count one sighting of `barcode`.
    ///
    /// A known barcode gets `quantity + 1`. An unknown barcode is created with
    /// quantity 1 and the product info returned by `fallback`, which is only
    /// awaited in that case. Nothing is written if loading fails.
    pub async fn upsert_increment<F, Fut>(
        &self,
        barcode: &Barcode,
        fallback: F,
    ) -> Result<Record, StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProductInfo>,
    {
        let medium = self.medium.lock().await;
        let mut inventory = medium.load()?;

        let existing = inventory
            .record_repeat_sighting(barcode)
            .map_err(|e| StoreError::format(e.to_string()))?
            .cloned();
        let record = match existing {
            Some(record) => {
                medium.save(&inventory)?;
                tracing::info!(
                    barcode = %record.barcode(),
                    quantity = record.quantity(),
                    "inventory record incremented"
                );
                record
            }
            None => {
                let product = fallback().await;
                let record = inventory
                    .record_first_sighting(barcode.clone(), product)
                    .map_err(|e| StoreError::format(e.to_string()))?
                    .clone();
                medium.save(&inventory)?;
                tracing::info!(
                    barcode = %record.barcode(),
                    name = record.name(),
                    brand = record.brand(),
                    "inventory record created"
                );
                record
            }
        };

        Ok(record)
    }
}
