use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use stockscan_infra::ScanResult;
use stockscan_inventory::Record;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Data URL (`data:image/jpeg;base64,...`) or bare base64.
    pub image: String,
}

/// Raw image bytes from a data URL or bare base64 string.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let encoded = match payload.split_once(',') {
        Some((_header, data)) => data,
        None => payload,
    };
    STANDARD.decode(encoded.trim())
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductJson {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub quantity: u64,
}

impl From<&Record> for ProductJson {
    fn from(r: &Record) -> Self {
        Self {
            barcode: r.barcode().to_string(),
            name: r.name().to_string(),
            brand: r.brand().to_string(),
            quantity: r.quantity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub symbol_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ScanResult> for ScanResponse {
    fn from(result: &ScanResult) -> Self {
        match result {
            ScanResult::Recorded {
                barcode,
                symbol_type,
                record,
            } => Self {
                success: true,
                barcode: Some(barcode.to_string()),
                symbol_type: Some(symbol_type.clone()),
                product: Some(ProductJson::from(record)),
                message: None,
            },
            other => Self {
                success: false,
                barcode: None,
                symbol_type: None,
                product: None,
                message: other.message().map(str::to_string),
            },
        }
    }
}

/// Inventory listing row; keys are the CSV column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryRow {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub quantity: u64,
}

impl From<&Record> for InventoryRow {
    fn from(r: &Record) -> Self {
        Self {
            barcode: r.barcode().to_string(),
            name: r.name().to_string(),
            brand: r.brand().to_string(),
            quantity: r.quantity(),
        }
    }
}
