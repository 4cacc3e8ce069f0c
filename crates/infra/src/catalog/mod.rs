//! Product catalog: name/brand lookup for barcodes seen for the first time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use stockscan_core::Barcode;
use stockscan_inventory::ProductInfo;

pub mod open_food_facts;

pub use open_food_facts::OpenFoodFactsClient;

/// Why a lookup produced no answer. Never leaves a [`CatalogClient`]; callers
/// only ever see the `Unknown` sentinel.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog base url {0:?} cannot be used")]
    InvalidBaseUrl(String),

    #[error("catalog unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("catalog answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("catalog response could not be read: {0}")]
    Body(#[source] reqwest::Error),

    #[error("product not in catalog")]
    NotFound,
}

/// Barcode → product info capability.
///
/// `lookup` is total: any failure (timeout, network, bad status, not found)
/// yields [`ProductInfo::unknown`].
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn lookup(&self, barcode: &Barcode) -> ProductInfo;
}

/// Fixed catalog for tests and offline use. Counts lookups.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<Barcode, ProductInfo>,
    lookups: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, barcode: Barcode, product: ProductInfo) -> Self {
        self.products.insert(barcode, product);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn lookup(&self, barcode: &Barcode) -> ProductInfo {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.products
            .get(barcode)
            .cloned()
            .unwrap_or_else(ProductInfo::unknown)
    }
}
