//! Wire records for the two persisted collections.
//!
//! This is the single normalization boundary: stored data may arrive with
//! snake_case or camelCase field spellings (the local fallback store predates
//! the schema cleanup), and conversion into the canonical models happens here
//! and nowhere else. A record that cannot be normalized is dropped by the
//! caller, never surfaced as an error.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Account, EntryStatus, EntryType, LedgerEntry};

// ---------------------------------------------------------------------------
// AccountRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub name: String,
    pub currency: String,
    #[serde(alias = "initialBalance")]
    pub initial_balance: Decimal,
    #[serde(alias = "currentBalance")]
    pub current_balance: Decimal,
    #[serde(alias = "totalDeposits", default)]
    pub total_deposits: Option<Decimal>,
    #[serde(alias = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AccountRecord {
    pub fn from_model(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            currency: account.currency.clone(),
            initial_balance: account.initial_balance,
            current_balance: account.current_balance,
            total_deposits: Some(account.total_deposits),
            created_at: Some(account.created_at),
        }
    }

    pub fn into_model(self) -> Account {
        Account {
            id: self.id,
            name: self.name,
            currency: self.currency,
            initial_balance: self.initial_balance,
            current_balance: self.current_balance,
            // Records persisted before deposit tracking fall back to the
            // initial balance, matching the ROI denominator rule.
            total_deposits: self.total_deposits.unwrap_or(self.initial_balance),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

// ---------------------------------------------------------------------------
// EntryRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EntryRecord {
    pub id: Uuid,
    #[serde(alias = "accountId")]
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub symbol: String,
    #[serde(rename = "type", alias = "entryType", alias = "entry_type")]
    #[sqlx(rename = "type")]
    pub entry_type: String,
    #[serde(alias = "lotSize", default)]
    pub lot_size: Decimal,
    #[serde(alias = "entryPrice", default)]
    pub entry_price: Decimal,
    #[serde(alias = "exitPrice", default)]
    pub exit_price: Option<Decimal>,
    #[serde(alias = "stopLoss", default)]
    pub stop_loss: Option<Decimal>,
    #[serde(alias = "takeProfit", default)]
    pub take_profit: Option<Decimal>,
    #[serde(default)]
    pub pnl: Option<Decimal>,
    pub status: String,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub mistakes: Option<String>,
    #[serde(default)]
    pub lessons: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "riskAmount", default)]
    pub risk_amount: Option<Decimal>,
    #[serde(alias = "screenshotUrl", default)]
    pub screenshot_url: Option<String>,
}

impl EntryRecord {
    pub fn from_model(entry: &LedgerEntry) -> Self {
        Self {
            id: entry.id,
            account_id: entry.account_id,
            date: entry.date,
            symbol: entry.symbol.clone(),
            entry_type: entry.entry_type.to_string(),
            lot_size: entry.lot_size,
            entry_price: entry.entry_price,
            exit_price: entry.exit_price,
            stop_loss: entry.stop_loss,
            take_profit: entry.take_profit,
            pnl: entry.pnl,
            status: entry.status.to_string(),
            emotion: Some(entry.emotion.clone()),
            mistakes: Some(entry.mistakes.clone()),
            lessons: Some(entry.lessons.clone()),
            notes: Some(entry.notes.clone()),
            tags: entry.tags.clone(),
            risk_amount: entry.risk_amount,
            screenshot_url: entry.screenshot_url.clone(),
        }
    }

    /// `None` when the type or status string is unrecognized.
    pub fn into_model(self) -> Option<LedgerEntry> {
        let entry_type = EntryType::from_str(&self.entry_type)?;
        let status = EntryStatus::from_str(&self.status)?;

        Some(LedgerEntry {
            id: self.id,
            account_id: self.account_id,
            date: self.date,
            symbol: self.symbol,
            entry_type,
            lot_size: self.lot_size,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            pnl: self.pnl,
            status,
            emotion: self.emotion.unwrap_or_default(),
            mistakes: self.mistakes.unwrap_or_default(),
            lessons: self.lessons.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            tags: self.tags,
            risk_amount: self.risk_amount,
            screenshot_url: self.screenshot_url,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
