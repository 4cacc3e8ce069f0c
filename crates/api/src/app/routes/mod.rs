use axum::{
    routing::{get, post},
    Router,
};

pub mod products;
pub mod scan;
pub mod system;

/// Router for the inventory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/scan", post(scan::scan))
        .route("/products", get(products::list_products))
        .route("/products/:barcode", get(products::get_product))
}
