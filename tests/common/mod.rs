use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;
use uuid::Uuid;

use tradelog::api::router::create_router;
use tradelog::config::{AppConfig, StorageBackend};
use tradelog::storage::Gateway;
use tradelog::AppState;

// Only one Prometheus recorder can be installed per process, so all tests in
// a binary share the handle.
static METRICS: OnceLock<PrometheusHandle> = OnceLock::new();

fn metrics_handle() -> PrometheusHandle {
    METRICS.get_or_init(tradelog::metrics::init_metrics).clone()
}

fn test_config(dir: std::path::PathBuf, api_token: Option<String>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        storage_backend: StorageBackend::Local,
        database_url: None,
        local_data_dir: dir,
        api_token,
        unresolved_pnl_breaks_streak: false,
    }
}

/// Build a router over a fresh local store in a unique temp directory.
#[allow(dead_code)]
pub fn build_test_app() -> axum::Router {
    build_test_app_with_token(None)
}

#[allow(dead_code)]
pub fn build_test_app_with_token(api_token: Option<String>) -> axum::Router {
    let dir = std::env::temp_dir().join(format!("tradelog-test-{}", Uuid::new_v4()));
    let gateway = Gateway::local_only(&dir);

    let state = AppState {
        gateway: Arc::new(gateway),
        config: test_config(dir, api_token),
        metrics_handle: metrics_handle(),
    };

    create_router(state)
}

/// Fire a request at the app and decode the JSON response body.
#[allow(dead_code)]
pub async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Create an account and return its id.
#[allow(dead_code)]
pub async fn seed_account(app: &axum::Router, name: &str, initial_balance: i64) -> String {
    let (status, json) = request(
        app,
        "POST",
        "/api/accounts",
        Some(serde_json::json!({
            "name": name,
            "currency": "USD",
            "initial_balance": initial_balance.to_string(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Record a closed buy trade with the given pnl and return its id.
#[allow(dead_code)]
pub async fn seed_closed_trade(
    app: &axum::Router,
    account_id: &str,
    symbol: &str,
    date: &str,
    pnl: i64,
) -> String {
    let (status, json) = request(
        app,
        "POST",
        "/api/entries",
        Some(serde_json::json!({
            "account_id": account_id,
            "symbol": symbol,
            "type": "buy",
            "date": date,
            "entry_price": "100",
            "status": "closed",
            "pnl": pnl.to_string(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    json["data"]["id"].as_str().unwrap().to_string()
}
