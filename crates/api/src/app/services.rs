//! Service wiring: configuration → decoder, catalog, store, notifier.

use std::sync::Arc;

use anyhow::Context;

use stockscan_infra::{
    catalog::{CatalogClient, OpenFoodFactsClient},
    config::AppConfig,
    decoder::RxingDecoder,
    notify::{ScanNotifier, SilentNotifier, TerminalBell},
    store::{CsvInventoryFile, InventoryStore},
    ReconciliationService,
};

/// Services shared by all handlers.
pub type AppServices = ReconciliationService<CsvInventoryFile>;

/// Build the production services. Creates the inventory file (header only) if missing.
pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let medium = CsvInventoryFile::open(&config.inventory_path).with_context(|| {
        format!(
            "failed to open inventory file {}",
            config.inventory_path.display()
        )
    })?;

    let catalog: Arc<dyn CatalogClient> = Arc::new(
        OpenFoodFactsClient::new(&config.catalog_url, config.catalog_timeout)
            .context("failed to build catalog client")?,
    );

    let notifier: Arc<dyn ScanNotifier> = if config.beep {
        Arc::new(TerminalBell)
    } else {
        Arc::new(SilentNotifier)
    };

    tracing::info!(
        inventory = %config.inventory_path.display(),
        catalog = %config.catalog_url,
        catalog_timeout_secs = config.catalog_timeout.as_secs(),
        beep = config.beep,
        "services configured"
    );

    Ok(ReconciliationService::new(
        Arc::new(RxingDecoder::new()),
        catalog,
        Arc::new(InventoryStore::new(medium)),
        notifier,
    ))
}
