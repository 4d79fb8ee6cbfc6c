use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::accounts::load_account;
use super::entries::EntryView;
use super::ApiResponse;
use crate::analytics::{
    account_performance, current_streak, daily_pnl, emotion_breakdown, tag_breakdown,
    AccountPerformance, EmotionStats, StreakKind, TagStats,
};
use crate::errors::AppError;
use crate::models::Account;
use crate::AppState;

#[derive(Serialize)]
pub struct PerformanceReport {
    #[serde(flatten)]
    pub performance: AccountPerformance,
    pub current_streak: u32,
    pub streak_type: Option<StreakKind>,
}

#[derive(Serialize)]
pub struct JournalExport {
    pub account: Account,
    pub entries: Vec<EntryView>,
}

/// GET /api/accounts/{id}/performance — aggregate stats plus the current
/// win/loss streak
pub async fn performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PerformanceReport>>, AppError> {
    let account = load_account(&state, id).await?;
    let entries = state.gateway.get_entries().await;

    let performance = account_performance(&account, &entries);
    let streak = current_streak(id, &entries, state.config.streak_policy());

    Ok(Json(ApiResponse::ok(PerformanceReport {
        performance,
        current_streak: streak.length,
        streak_type: streak.kind,
    })))
}

/// GET /api/accounts/{id}/calendar — realized P&L per day
pub async fn calendar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BTreeMap<NaiveDate, Decimal>>>, AppError> {
    load_account(&state, id).await?;
    let entries = state.gateway.get_entries().await;

    Ok(Json(ApiResponse::ok(daily_pnl(id, &entries))))
}

/// GET /api/accounts/{id}/tags — per-tag performance over real trades
pub async fn tags(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TagStats>>>, AppError> {
    load_account(&state, id).await?;
    let entries = state.gateway.get_entries().await;

    Ok(Json(ApiResponse::ok(tag_breakdown(id, &entries))))
}

/// GET /api/accounts/{id}/emotions — per-emotion performance over real trades
pub async fn emotions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<EmotionStats>>>, AppError> {
    load_account(&state, id).await?;
    let entries = state.gateway.get_entries().await;

    Ok(Json(ApiResponse::ok(emotion_breakdown(id, &entries))))
}

/// GET /api/accounts/{id}/export — the account and its full ledger, for
/// backup or import elsewhere
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JournalExport>>, AppError> {
    let account = load_account(&state, id).await?;
    let entries = state.gateway.get_entries().await;

    let views: Vec<EntryView> = entries
        .into_iter()
        .filter(|e| e.account_id == id)
        .map(EntryView::from)
        .collect();

    Ok(Json(ApiResponse::ok(JournalExport {
        account,
        entries: views,
    })))
}
