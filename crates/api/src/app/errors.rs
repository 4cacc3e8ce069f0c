use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockscan_infra::store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    let code = match err {
        StoreError::Io(_) => "store_unavailable",
        StoreError::Format(_) => "store_malformed",
    };
    json_error(StatusCode::INTERNAL_SERVER_ERROR, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
