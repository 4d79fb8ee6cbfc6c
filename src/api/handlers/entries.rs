use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::accounts::load_account;
use super::ApiResponse;
use crate::analytics::{has_r_multiple, r_multiple, EntryFilter, Outcome};
use crate::errors::AppError;
use crate::ledger;
use crate::models::{Account, EntryStatus, EntryType, LedgerEntry};
use crate::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct EntryQuery {
    pub account_id: Option<Uuid>,
    /// Status or result: open/closed/stopped/win/loss. "all" and unset both
    /// mean no constraint.
    pub outcome: Option<String>,
    pub emotion: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateEntryRequest {
    pub account_id: Uuid,
    pub symbol: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub date: Option<NaiveDate>,
    pub lot_size: Option<Decimal>,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub status: Option<String>,
    pub emotion: Option<String>,
    pub mistakes: Option<String>,
    pub lessons: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub risk_amount: Option<Decimal>,
    pub screenshot_url: Option<String>,
}

/// Partial update: fields that are present overwrite, absent fields are left
/// unchanged. The entry's id, account, and type are immutable.
#[derive(Deserialize)]
pub struct UpdateEntryRequest {
    pub symbol: Option<String>,
    pub date: Option<NaiveDate>,
    pub lot_size: Option<Decimal>,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub status: Option<String>,
    pub emotion: Option<String>,
    pub mistakes: Option<String>,
    pub lessons: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub risk_amount: Option<Decimal>,
    pub screenshot_url: Option<String>,
}

/// An entry as returned by the API: the stored fields plus the R-multiple,
/// which is recomputed from the price/risk fields on every read.
#[derive(Serialize)]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub r_multiple: Option<Decimal>,
}

impl From<LedgerEntry> for EntryView {
    fn from(entry: LedgerEntry) -> Self {
        let r = has_r_multiple(&entry).then(|| r_multiple(&entry));
        Self {
            entry,
            r_multiple: r,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/entries — list entries, optionally filtered
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<ApiResponse<Vec<EntryView>>>, AppError> {
    let filter = build_filter(query)?;
    let entries = state.gateway.get_entries().await;

    let views: Vec<EntryView> = filter
        .apply(&entries)
        .into_iter()
        .cloned()
        .map(EntryView::from)
        .collect();

    Ok(Json(ApiResponse::ok(views)))
}

/// POST /api/entries — record a buy/sell trade. Capital movements go through
/// the account deposit/withdraw endpoints instead.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<Json<ApiResponse<EntryView>>, AppError> {
    let entry_type = EntryType::from_str(&body.entry_type)
        .filter(EntryType::is_real_trade)
        .ok_or_else(|| {
            AppError::BadRequest(
                "type must be 'buy' or 'sell'; use the deposit/withdraw endpoints for capital movements".into(),
            )
        })?;

    if body.symbol.trim().is_empty() {
        return Err(AppError::BadRequest("symbol is required".into()));
    }
    if body.entry_price <= Decimal::ZERO {
        return Err(AppError::BadRequest("entry_price must be greater than zero".into()));
    }

    let status = match &body.status {
        Some(raw) => EntryStatus::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status '{raw}'")))?,
        None => EntryStatus::Open,
    };

    let mut account = load_account(&state, body.account_id).await?;

    let entry = LedgerEntry {
        id: Uuid::new_v4(),
        account_id: body.account_id,
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
        symbol: body.symbol.trim().to_string(),
        entry_type,
        lot_size: body.lot_size.unwrap_or(Decimal::ONE),
        entry_price: body.entry_price,
        exit_price: body.exit_price,
        stop_loss: body.stop_loss,
        take_profit: body.take_profit,
        pnl: body.pnl,
        status,
        emotion: body.emotion.unwrap_or_default(),
        mistakes: body.mistakes.unwrap_or_default(),
        lessons: body.lessons.unwrap_or_default(),
        notes: body.notes.unwrap_or_default(),
        tags: body.tags.unwrap_or_default(),
        risk_amount: body.risk_amount,
        screenshot_url: body.screenshot_url,
    };

    state.gateway.save_entry(&entry).await?;
    rebuild_account(&state, &mut account).await?;

    counter!("entries_recorded_total").increment(1);
    tracing::info!(entry_id = %entry.id, symbol = %entry.symbol, "Entry recorded");
    Ok(Json(ApiResponse::ok(EntryView::from(entry))))
}

/// PUT /api/entries/{id} — update an existing entry
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<EntryView>>, AppError> {
    let entries = state.gateway.get_entries().await;
    let mut entry = entries
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("entry not found".into()))?;

    if !entry.is_real_trade() {
        return Err(AppError::BadRequest(
            "deposit/withdrawal entries cannot be edited".into(),
        ));
    }

    if let Some(symbol) = body.symbol {
        if symbol.trim().is_empty() {
            return Err(AppError::BadRequest("symbol is required".into()));
        }
        entry.symbol = symbol.trim().to_string();
    }
    if let Some(raw) = &body.status {
        entry.status = EntryStatus::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status '{raw}'")))?;
    }
    if let Some(entry_price) = body.entry_price {
        if entry_price <= Decimal::ZERO {
            return Err(AppError::BadRequest("entry_price must be greater than zero".into()));
        }
        entry.entry_price = entry_price;
    }

    entry.date = body.date.unwrap_or(entry.date);
    entry.lot_size = body.lot_size.unwrap_or(entry.lot_size);
    entry.exit_price = body.exit_price.or(entry.exit_price);
    entry.stop_loss = body.stop_loss.or(entry.stop_loss);
    entry.take_profit = body.take_profit.or(entry.take_profit);
    entry.pnl = body.pnl.or(entry.pnl);
    entry.emotion = body.emotion.unwrap_or(entry.emotion);
    entry.mistakes = body.mistakes.unwrap_or(entry.mistakes);
    entry.lessons = body.lessons.unwrap_or(entry.lessons);
    entry.notes = body.notes.unwrap_or(entry.notes);
    entry.tags = body.tags.unwrap_or(entry.tags);
    entry.risk_amount = body.risk_amount.or(entry.risk_amount);
    entry.screenshot_url = body.screenshot_url.or(entry.screenshot_url);

    state.gateway.save_entry(&entry).await?;

    let mut account = load_account(&state, entry.account_id).await?;
    rebuild_account(&state, &mut account).await?;

    Ok(Json(ApiResponse::ok(EntryView::from(entry))))
}

/// DELETE /api/entries/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let entries = state.gateway.get_entries().await;
    let entry = entries
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::NotFound("entry not found".into()))?;
    let account_id = entry.account_id;

    state.gateway.delete_entry(id).await?;

    // The deleted entry may have contributed to the cached balances.
    if let Ok(mut account) = load_account(&state, account_id).await {
        rebuild_account(&state, &mut account).await?;
    }

    Ok(Json(ApiResponse::ok(())))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_filter(query: EntryQuery) -> Result<EntryFilter, AppError> {
    let outcome = match query.outcome.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            Outcome::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown outcome '{raw}'")))?,
        ),
    };

    let entry_type = match query.entry_type.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            EntryType::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown type '{raw}'")))?,
        ),
    };

    Ok(EntryFilter {
        account_id: query.account_id,
        outcome,
        emotion: query.emotion.filter(|s| !s.is_empty()),
        tag: query.tag.filter(|s| !s.is_empty()),
        entry_type,
        date_from: query.date_from,
        date_to: query.date_to,
    })
}

async fn rebuild_account(state: &AppState, account: &mut Account) -> Result<(), AppError> {
    let entries = state.gateway.get_entries().await;
    ledger::rebuild_balances(account, &entries);
    state.gateway.save_account(account).await?;
    Ok(())
}
