use std::path::PathBuf;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde_json::json;

use stockscan_core::Barcode;
use stockscan_infra::{
    catalog::InMemoryCatalog,
    decoder::{DecodeError, DecodedSymbol, SymbolDecoder},
    notify::SilentNotifier,
    store::{CsvInventoryFile, InventoryStore},
    ReconciliationService,
};
use stockscan_inventory::ProductInfo;

/// Test decoder: the "image" is UTF-8 text `TYPE:payload`, one symbol per line.
/// Non-UTF-8 bytes are an invalid image; an empty body holds no symbols.
struct TextDecoder;

impl SymbolDecoder for TextDecoder {
    fn decode(&self, image: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let text = std::str::from_utf8(image)
            .map_err(|_| DecodeError::InvalidImage("not a test frame".into()))?;
        Ok(text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(kind, payload)| DecodedSymbol::new(payload, kind))
            .collect())
    }
}

struct TestServer {
    base_url: String,
    csv_path: PathBuf,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with_csv(None).await
    }

    async fn spawn_with_csv(initial: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let csv_path = dir.path().join("products.csv");
        if let Some(contents) = initial {
            std::fs::write(&csv_path, contents).unwrap();
        }

        let catalog = InMemoryCatalog::new().with_product(
            Barcode::parse("012345").unwrap(),
            ProductInfo::new("Cola", "Acme"),
        );
        let services = ReconciliationService::new(
            Arc::new(TextDecoder),
            Arc::new(catalog),
            Arc::new(InventoryStore::new(CsvInventoryFile::open(&csv_path).unwrap())),
            Arc::new(SilentNotifier),
        );

        // Same router as prod, bound to an ephemeral port.
        let app = stockscan_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            csv_path,
            handle,
            _dir: dir,
        }
    }

    async fn scan(&self, client: &reqwest::Client, frame: &str) -> serde_json::Value {
        let image = format!("data:image/jpeg;base64,{}", STANDARD.encode(frame));
        let res = client
            .post(format!("{}/scan", self.base_url))
            .json(&json!({ "image": image }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }

    async fn products(&self, client: &reqwest::Client) -> (StatusCode, serde_json::Value) {
        let res = client
            .get(format!("{}/products", self.base_url))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn first_scan_creates_and_second_scan_increments() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = srv.scan(&client, "EAN13:012345").await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "barcode": "012345",
            "type": "EAN13",
            "product": { "barcode": "012345", "name": "Cola", "brand": "Acme", "quantity": 1 }
        })
    );

    let body = srv.scan(&client, "EAN13:012345").await;
    assert_eq!(body["product"]["quantity"], 2);
    assert_eq!(body["product"]["name"], "Cola");

    let (status, listed) = srv.products(&client).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listed,
        json!([{ "Barcode": "012345", "Name": "Cola", "Brand": "Acme", "Quantity": 2 }])
    );
    assert_eq!(
        std::fs::read_to_string(&srv.csv_path).unwrap(),
        "Barcode,Name,Brand,Quantity\n012345,Cola,Acme,2\n"
    );
}

#[tokio::test]
async fn existing_inventory_file_is_continued() {
    let srv =
        TestServer::spawn_with_csv(Some("Barcode,Name,Brand,Quantity\r\n012345,Cola,Acme,3\r\n"))
            .await;
    let client = reqwest::Client::new();

    let body = srv.scan(&client, "EAN13:012345").await;
    assert_eq!(body["product"]["quantity"], 4);
}

#[tokio::test]
async fn unknown_product_gets_sentinel_values_and_keeps_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.scan(&client, "QRCODE:999999").await;
    srv.scan(&client, "EAN13:012345").await;

    let (_, listed) = srv.products(&client).await;
    assert_eq!(
        listed,
        json!([
            { "Barcode": "999999", "Name": "Unknown", "Brand": "Unknown", "Quantity": 1 },
            { "Barcode": "012345", "Name": "Cola", "Brand": "Acme", "Quantity": 1 }
        ])
    );
}

#[tokio::test]
async fn frame_without_barcode_reports_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = srv.scan(&client, "").await;
    assert_eq!(body, json!({ "success": false, "message": "No barcode detected" }));

    let (_, listed) = srv.products(&client).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn undecodable_payloads_report_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Not base64 at all.
    let res = client
        .post(format!("{}/scan", srv.base_url))
        .json(&json!({ "image": "data:image/jpeg;base64,***" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("base64"));

    // Valid base64, not an image.
    let res = client
        .post(format!("{}/scan", srv.base_url))
        .json(&json!({ "image": STANDARD.encode([0xffu8, 0xfe, 0x00]) }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("invalid image"));
}

#[tokio::test]
async fn malformed_scan_requests_get_a_structured_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let url = format!("{}/scan", srv.base_url);

    let requests = [
        client.post(&url).json(&json!({})),
        client.post(&url).json(&json!({ "image": 5 })),
        client
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json"),
        client.post(&url).body("image=abc"),
    ];

    for request in requests {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["success"], false, "{body}");
        assert!(!body["message"].as_str().unwrap().is_empty(), "{body}");
    }

    let (_, listed) = srv.products(&client).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn scan_at_max_quantity_fails_and_keeps_the_file() {
    let contents = format!("Barcode,Name,Brand,Quantity\n012345,Cola,Acme,{}\n", u64::MAX);
    let srv = TestServer::spawn_with_csv(Some(&contents)).await;
    let client = reqwest::Client::new();

    let body = srv.scan(&client, "EAN13:012345").await;
    assert_eq!(body["success"], false);
    assert_eq!(std::fs::read_to_string(&srv.csv_path).unwrap(), contents);
}

#[tokio::test]
async fn corrupt_inventory_is_reported_as_an_error_payload() {
    let srv =
        TestServer::spawn_with_csv(Some("Barcode,Name,Brand,Quantity\n012345,Cola,Acme,many\n"))
            .await;
    let client = reqwest::Client::new();

    let (status, body) = srv.products(&client).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store_malformed");

    let body = srv.scan(&client, "EAN13:012345").await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn single_product_lookup() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.scan(&client, "EAN13:012345").await;

    let res = client
        .get(format!("{}/products/012345", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["Quantity"], 1);

    let res = client
        .get(format!("{}/products/424242", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_scans_do_not_lose_increments() {
    let srv = Arc::new(TestServer::spawn().await);
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let srv = srv.clone();
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            srv.scan(&client, "EAN13:012345").await
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap()["success"], true);
    }

    let (_, listed) = srv.products(&client).await;
    assert_eq!(listed[0]["Quantity"], 16);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
