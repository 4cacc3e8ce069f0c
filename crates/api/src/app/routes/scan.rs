use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use stockscan_infra::ScanResult;

use crate::app::dto;
use crate::app::services::AppServices;

/// Decode the submitted frame and count the first barcode found in it.
///
/// Always answers 200; success or failure is carried in the body, including
/// for request bodies that are not `{"image": "<string>"}`.
pub async fn scan(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::ScanRequest>, JsonRejection>,
) -> Json<dto::ScanResponse> {
    let result = match payload {
        Ok(Json(body)) => scan_payload(&services, &body.image).await,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "scan request body rejected");
            ScanResult::Failed {
                reason: rejection.body_text(),
            }
        }
    };

    Json(dto::ScanResponse::from(&result))
}

async fn scan_payload(services: &AppServices, image: &str) -> ScanResult {
    match dto::decode_image_payload(image) {
        Ok(image) => services.scan(image).await,
        Err(e) => {
            tracing::warn!(error = %e, "scan payload is not valid base64");
            ScanResult::Failed {
                reason: format!("image payload is not valid base64: {e}"),
            }
        }
    }
}
