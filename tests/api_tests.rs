mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;

use common::{build_test_app, build_test_app_with_token, request, seed_account, seed_closed_trade};

fn decimal(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = build_test_app();

    let (status, json) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = build_test_app();

    let (status, _) = request(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_gate() {
    let app = build_test_app_with_token(Some("secret".into()));

    let (status, _) = request(&app, "GET", "/api/accounts", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Health stays public even with a token configured.
    let (status, _) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_list_accounts() {
    let app = build_test_app();

    let id = seed_account(&app, "Main", 1000).await;

    let (status, json) = request(&app, "GET", "/api/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let accounts = json["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["id"], id.as_str());
    assert_eq!(decimal(&accounts[0]["current_balance"]), Decimal::from(1000));
    assert_eq!(decimal(&accounts[0]["total_deposits"]), Decimal::from(1000));
}

#[tokio::test]
async fn test_account_validation_and_missing_lookup() {
    let app = build_test_app();

    let (status, json) = request(
        &app,
        "POST",
        "/api/accounts",
        Some(serde_json::json!({ "name": "  ", "initial_balance": "1000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = request(
        &app,
        "GET",
        "/api/accounts/7f0e2f9e-0b58-4a6e-9d3e-0d6a3c8f4a11",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_entry_and_filtered_list() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    seed_closed_trade(&app, &account_id, "EUR/USD", "2024-03-01", 50).await;
    seed_closed_trade(&app, &account_id, "XAU/USD", "2024-03-02", -20).await;

    let uri = format!("/api/entries?account_id={account_id}&outcome=win");
    let (status, json) = request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let wins = json["data"].as_array().unwrap();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0]["symbol"], "EUR/USD");

    // "all" means no constraint.
    let uri = format!("/api/entries?account_id={account_id}&outcome=all");
    let (_, json) = request(&app, "GET", &uri, None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (status, _) = request(&app, "GET", "/api/entries?outcome=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entry_rejects_capital_movement_type() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/entries",
        Some(serde_json::json!({
            "account_id": account_id,
            "symbol": "Deposit",
            "type": "deposit",
            "entry_price": "1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entry_includes_computed_r_multiple() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    let (status, json) = request(
        &app,
        "POST",
        "/api/entries",
        Some(serde_json::json!({
            "account_id": account_id,
            "symbol": "EUR/USD",
            "type": "buy",
            "entry_price": "100",
            "exit_price": "110",
            "lot_size": "2",
            "risk_amount": "5",
            "status": "closed",
            "pnl": "20",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // (110 - 100) * 2 / 5
    assert_eq!(decimal(&json["data"]["r_multiple"]), Decimal::from(4));
}

#[tokio::test]
async fn test_performance_report() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    seed_closed_trade(&app, &account_id, "EUR/USD", "2024-03-01", -25).await;
    seed_closed_trade(&app, &account_id, "XAU/USD", "2024-03-02", 50).await;

    let uri = format!("/api/accounts/{account_id}/performance");
    let (status, json) = request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["real_trades"], 2);
    assert_eq!(data["winning_trades"], 1);
    assert_eq!(data["losing_trades"], 1);
    assert_eq!(decimal(&data["total_pnl"]), Decimal::from(25));
    assert_eq!(decimal(&data["win_rate"]), Decimal::from(50));
    // Most recent trade won; the earlier loss ends the run.
    assert_eq!(data["current_streak"], 1);
    assert_eq!(data["streak_type"], "win");
}

#[tokio::test]
async fn test_calendar_buckets_by_day() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    seed_closed_trade(&app, &account_id, "EUR/USD", "2024-03-01", 50).await;
    seed_closed_trade(&app, &account_id, "XAU/USD", "2024-03-01", 20).await;
    seed_closed_trade(&app, &account_id, "BTC/USD", "2024-03-02", -10).await;

    let uri = format!("/api/accounts/{account_id}/calendar");
    let (status, json) = request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(decimal(&json["data"]["2024-03-01"]), Decimal::from(70));
    assert_eq!(decimal(&json["data"]["2024-03-02"]), Decimal::from(-10));
}

#[tokio::test]
async fn test_tag_and_emotion_breakdowns() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/entries",
        Some(serde_json::json!({
            "account_id": account_id,
            "symbol": "EUR/USD",
            "type": "buy",
            "entry_price": "100",
            "status": "closed",
            "pnl": "40",
            "tags": ["breakout", "london"],
            "emotion": "confident",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/accounts/{account_id}/tags");
    let (_, json) = request(&app, "GET", &uri, None).await;
    let tags = json["data"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().any(|t| t["tag"] == "breakout"));

    let uri = format!("/api/accounts/{account_id}/emotions");
    let (_, json) = request(&app, "GET", &uri, None).await;
    let emotions = json["data"].as_array().unwrap();
    assert_eq!(emotions.len(), 1);
    assert_eq!(emotions[0]["emotion"], "confident");
    assert_eq!(decimal(&emotions[0]["total_pnl"]), Decimal::from(40));
}

#[tokio::test]
async fn test_export_includes_full_ledger() {
    let app = build_test_app();
    let account_id = seed_account(&app, "Main", 1000).await;
    seed_closed_trade(&app, &account_id, "EUR/USD", "2024-03-01", 50).await;

    let uri = format!("/api/accounts/{account_id}/deposit");
    let (status, _) = request(
        &app,
        "POST",
        &uri,
        Some(serde_json::json!({ "amount": "500", "date": "2024-03-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/accounts/{account_id}/export");
    let (status, json) = request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["account"]["id"], account_id.as_str());
    // Both the trade and the deposit entry are part of the ledger.
    assert_eq!(json["data"]["entries"].as_array().unwrap().len(), 2);
}
