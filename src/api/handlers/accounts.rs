use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use metrics::{counter, gauge};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiResponse;
use crate::errors::AppError;
use crate::ledger;
use crate::models::{Account, LedgerEntry};
use crate::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub initial_balance: Decimal,
}

fn default_currency() -> String {
    "USD".into()
}

#[derive(Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct CapitalMovement {
    pub account: Account,
    pub entry: LedgerEntry,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/accounts — list all accounts
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<Account>>> {
    let accounts = state.gateway.get_accounts().await;
    gauge!("accounts").set(accounts.len() as f64);
    Json(ApiResponse::ok(accounts))
}

/// GET /api/accounts/{id} — account detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Account>>, AppError> {
    let account = load_account(&state, id).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// POST /api/accounts — create a new account
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<Json<ApiResponse<Account>>, AppError> {
    let account = ledger::create_account(&body.name, &body.currency, body.initial_balance)?;
    state.gateway.save_account(&account).await?;

    tracing::info!(account_id = %account.id, name = %account.name, "Account created");
    Ok(Json(ApiResponse::ok(account)))
}

/// DELETE /api/accounts/{id} — delete an account and all its entries
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    load_account(&state, id).await?;
    state.gateway.delete_account(id).await?;

    tracing::info!(account_id = %id, "Account deleted");
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/accounts/{id}/deposit — add funds
pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<ApiResponse<CapitalMovement>>, AppError> {
    let mut account = load_account(&state, id).await?;
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let entry = ledger::deposit(&mut account, body.amount, date)?;
    persist_movement(&state, &mut account, &entry).await?;

    counter!("deposits_total").increment(1);
    Ok(Json(ApiResponse::ok(CapitalMovement { account, entry })))
}

/// POST /api/accounts/{id}/withdraw — remove funds; rejected when the amount
/// exceeds the current balance
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AmountRequest>,
) -> Result<Json<ApiResponse<CapitalMovement>>, AppError> {
    let mut account = load_account(&state, id).await?;
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let entry = ledger::withdraw(&mut account, body.amount, date)?;
    persist_movement(&state, &mut account, &entry).await?;

    counter!("withdrawals_total").increment(1);
    Ok(Json(ApiResponse::ok(CapitalMovement { account, entry })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(super) async fn load_account(state: &AppState, id: Uuid) -> Result<Account, AppError> {
    state
        .gateway
        .get_accounts()
        .await
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::NotFound("account not found".into()))
}

/// Persist a capital-movement entry, then rebuild the cached balance fields
/// from the stored entry set so the totals cannot drift from the ledger.
async fn persist_movement(
    state: &AppState,
    account: &mut Account,
    entry: &LedgerEntry,
) -> Result<(), AppError> {
    state.gateway.save_entry(entry).await?;

    let entries = state.gateway.get_entries().await;
    ledger::rebuild_balances(account, &entries);
    state.gateway.save_account(account).await?;

    Ok(())
}
