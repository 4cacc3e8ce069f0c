//! Scan reconciliation (application-level orchestration).
//!
//! ```text
//! image bytes
//!   ↓
//! 1. Decode symbols (blocking pool)        → none: NoSymbol
//!   ↓
//! 2. Take the first symbol                 → extra symbols in the frame are ignored
//!   ↓
//! 3. InventoryStore::upsert_increment      → catalog consulted on first sighting only
//!   ↓
//! 4. Notify (best-effort, after commit)
//! ```
//!
//! Decoder and store failures are caught here and turned into
//! [`ScanResult::Failed`]; callers never see a raw error from `scan`.

use std::sync::Arc;

use thiserror::Error;

use stockscan_core::{Barcode, DomainError};
use stockscan_inventory::Record;

use crate::catalog::CatalogClient;
use crate::decoder::{DecodeError, SymbolDecoder};
use crate::notify::ScanNotifier;
use crate::store::{InventoryMedium, InventoryStore, StoreError};

/// Message reported when an image holds no readable symbol.
pub const NO_SYMBOL_MESSAGE: &str = "No barcode detected";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("decoded symbol rejected: {0}")]
    Payload(#[source] DomainError),

    #[error("decoder worker failed: {0}")]
    Worker(String),
}

/// Outcome of one scan request. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// A symbol was decoded and counted.
    Recorded {
        barcode: Barcode,
        symbol_type: String,
        record: Record,
    },
    /// The image was valid but held no readable symbol. The store is untouched.
    NoSymbol,
    /// The scan could not be completed; the store is untouched.
    Failed { reason: String },
}

impl ScanResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ScanResult::Recorded { .. })
    }

    /// Human-readable reason for an unsuccessful scan.
    pub fn message(&self) -> Option<&str> {
        match self {
            ScanResult::Recorded { .. } => None,
            ScanResult::NoSymbol => Some(NO_SYMBOL_MESSAGE),
            ScanResult::Failed { reason } => Some(reason.as_str()),
        }
    }
}

/// Decode → reconcile → notify.
pub struct ReconciliationService<M> {
    decoder: Arc<dyn SymbolDecoder>,
    catalog: Arc<dyn CatalogClient>,
    store: Arc<InventoryStore<M>>,
    notifier: Arc<dyn ScanNotifier>,
}

impl<M> Clone for ReconciliationService<M> {
    fn clone(&self) -> Self {
        Self {
            decoder: Arc::clone(&self.decoder),
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<M> ReconciliationService<M>
where
    M: InventoryMedium,
{
    pub fn new(
        decoder: Arc<dyn SymbolDecoder>,
        catalog: Arc<dyn CatalogClient>,
        store: Arc<InventoryStore<M>>,
        notifier: Arc<dyn ScanNotifier>,
    ) -> Self {
        Self {
            decoder,
            catalog,
            store,
            notifier,
        }
    }

    pub async fn scan(&self, image: Vec<u8>) -> ScanResult {
        match self.try_scan(image).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "scan failed");
                ScanResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_scan(&self, image: Vec<u8>) -> Result<ScanResult, ScanError> {
        let decoder = Arc::clone(&self.decoder);
        let symbols = tokio::task::spawn_blocking(move || decoder.decode(&image))
            .await
            .map_err(|e| ScanError::Worker(e.to_string()))??;

        let total = symbols.len();
        let Some(first) = symbols.into_iter().next() else {
            tracing::debug!("no symbol in image");
            return Ok(ScanResult::NoSymbol);
        };
        if total > 1 {
            tracing::debug!(ignored = total - 1, "multiple symbols in frame; using the first");
        }

        let barcode = Barcode::parse(first.payload).map_err(ScanError::Payload)?;
        let catalog = &self.catalog;
        let record = self
            .store
            .upsert_increment(&barcode, || catalog.lookup(&barcode))
            .await?;

        if let Err(e) = self.notifier.notify(&record) {
            tracing::debug!(error = %e, "scan notification failed");
        }

        Ok(ScanResult::Recorded {
            barcode,
            symbol_type: first.symbol_type,
            record,
        })
    }

    /// Every record, in first-sighting order.
    pub async fn history(&self) -> Result<Vec<Record>, StoreError> {
        self.store.list_all().await.inspect_err(|e| {
            tracing::warn!(error = %e, "inventory listing failed");
        })
    }

    /// Single record lookup; no side effects.
    pub async fn record(&self, barcode: &Barcode) -> Result<Option<Record>, StoreError> {
        self.store.get(barcode).await
    }
}
