use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use stockscan_core::Barcode;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Full inventory in first-sighting order.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.history().await {
        Ok(records) => {
            let rows: Vec<dto::InventoryRow> = records.iter().map(dto::InventoryRow::from).collect();
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(barcode): Path<String>,
) -> axum::response::Response {
    let barcode = match Barcode::parse(barcode) {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_barcode", e.to_string()),
    };

    match services.record(&barcode).await {
        Ok(Some(record)) => (StatusCode::OK, Json(dto::InventoryRow::from(&record))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "barcode not in inventory"),
        Err(e) => errors::store_error_to_response(e),
    }
}
