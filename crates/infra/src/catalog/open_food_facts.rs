//! Open Food Facts catalog client (`GET /api/v0/product/{barcode}.json`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use stockscan_core::Barcode;
use stockscan_inventory::{ProductInfo, UNKNOWN};

use super::{CatalogClient, CatalogError};

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<ProductFields>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductFields {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
}

/// HTTP client for the Open Food Facts product API.
///
/// Every request is bounded by the client timeout and never retried.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(base_url).map_err(|_| CatalogError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Unreachable)?;
        Ok(Self { http, base_url })
    }

    fn product_url(&self, barcode: &Barcode) -> Result<Url, CatalogError> {
        let leaf = format!("{barcode}.json");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v0", "product", leaf.as_str()]);
        Ok(url)
    }

    /// Lookup with the failure reason preserved.
    pub async fn try_lookup(&self, barcode: &Barcode) -> Result<ProductInfo, CatalogError> {
        let url = self.product_url(barcode)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogError::Unreachable)?;

        if response.status() != StatusCode::OK {
            return Err(CatalogError::Status(response.status()));
        }

        let body: ProductResponse = response.json().await.map_err(CatalogError::Body)?;
        if body.status != 1 {
            return Err(CatalogError::NotFound);
        }

        let fields = body.product.unwrap_or_default();
        Ok(ProductInfo::new(
            or_unknown(fields.product_name),
            or_unknown(fields.brands),
        ))
    }
}

fn or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

#[async_trait]
impl CatalogClient for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &Barcode) -> ProductInfo {
        match self.try_lookup(barcode).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(%barcode, error = %e, "catalog lookup failed; using Unknown");
                ProductInfo::unknown()
            }
        }
    }
}
