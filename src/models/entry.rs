use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntryStatus, EntryType};

/// A single journaled event on an account: a market trade or a capital
/// movement. Deposits/withdrawals are always `closed`, carry their amount in
/// `pnl` (negative for withdrawals), and never carry risk fields.
///
/// The R-multiple is deliberately not a field here; it is derived from the
/// price/risk fields on read (`analytics::r_multiple`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub symbol: String,
    pub entry_type: EntryType,
    pub lot_size: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub status: EntryStatus,
    pub emotion: String,
    pub mistakes: String,
    pub lessons: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub risk_amount: Option<Decimal>,
    pub screenshot_url: Option<String>,
}

impl LedgerEntry {
    pub fn is_real_trade(&self) -> bool {
        self.entry_type.is_real_trade()
    }

    /// Realized P&L, with missing treated as zero.
    pub fn pnl_or_zero(&self) -> Decimal {
        self.pnl.unwrap_or(Decimal::ZERO)
    }

    /// Win classification used by filters and streaks: strictly positive pnl.
    pub fn is_win(&self) -> bool {
        self.pnl_or_zero() > Decimal::ZERO
    }
}
