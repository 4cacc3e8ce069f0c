use std::sync::RwLock;

use stockscan_inventory::Inventory;

use super::{InventoryMedium, StoreError};

/// In-memory medium for tests/dev. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryMedium {
    inner: RwLock<Inventory>,
}

impl InMemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            inner: RwLock::new(inventory),
        }
    }
}

impl InventoryMedium for InMemoryMedium {
    fn load(&self) -> Result<Inventory, StoreError> {
        let inventory = self
            .inner
            .read()
            .map_err(|_| StoreError::format("in-memory inventory lock poisoned"))?;
        Ok(inventory.clone())
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let mut current = self
            .inner
            .write()
            .map_err(|_| StoreError::format("in-memory inventory lock poisoned"))?;
        *current = inventory.clone();
        Ok(())
    }
}
