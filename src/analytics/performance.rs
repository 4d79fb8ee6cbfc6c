use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Account, EntryType, LedgerEntry};

/// Realized performance for one account, over its buy/sell entries only.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPerformance {
    pub total_pnl: Decimal,
    pub real_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage in [0, 100]; 0 when the account has no real trades.
    pub win_rate: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub avg_r_multiple: Decimal,
    /// total_pnl / capital contributed, as a percentage.
    pub roi: Decimal,
}

// ---------------------------------------------------------------------------
// R-multiple
// ---------------------------------------------------------------------------

/// Profit expressed as a multiple of the amount risked.
///
/// Returns zero (not an error) when the entry, exit, or risk amount is
/// missing or zero — an open or unplanned trade simply has no R-multiple.
/// Lot size defaults to 1 when unset.
pub fn r_multiple(entry: &LedgerEntry) -> Decimal {
    if !has_r_multiple(entry) {
        return Decimal::ZERO;
    }

    let exit = entry.exit_price.unwrap_or(Decimal::ZERO);
    let risk = entry.risk_amount.unwrap_or(Decimal::ZERO);
    let lot = if entry.lot_size.is_zero() {
        Decimal::ONE
    } else {
        entry.lot_size
    };

    let profit = match entry.entry_type {
        EntryType::Buy => (exit - entry.entry_price) * lot,
        EntryType::Sell => (entry.entry_price - exit) * lot,
        // Capital movements carry no risk by construction.
        EntryType::Deposit | EntryType::Withdrawal => return Decimal::ZERO,
    };

    profit / risk
}

/// Whether the R-multiple preconditions hold: entry price, exit price, and a
/// nonzero risk amount are all present on a real trade.
pub fn has_r_multiple(entry: &LedgerEntry) -> bool {
    entry.is_real_trade()
        && !entry.entry_price.is_zero()
        && entry.exit_price.map_or(false, |p| !p.is_zero())
        && entry.risk_amount.map_or(false, |r| !r.is_zero())
}

// ---------------------------------------------------------------------------
// Per-account aggregate
// ---------------------------------------------------------------------------

/// Compute realized performance for `account` from a full entry snapshot.
/// Total over degenerate input: an account with no trades yields all zeros.
pub fn account_performance(account: &Account, entries: &[LedgerEntry]) -> AccountPerformance {
    let real: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| e.account_id == account.id && e.is_real_trade())
        .collect();

    let total_pnl = real.iter().map(|e| e.pnl_or_zero()).sum::<Decimal>();
    let winning = real.iter().filter(|e| e.pnl_or_zero() > Decimal::ZERO).count();
    let losing = real.iter().filter(|e| e.pnl_or_zero() < Decimal::ZERO).count();

    let win_rate = if real.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from(winning as i64) / Decimal::from(real.len() as i64) * Decimal::ONE_HUNDRED
    };

    // Max/min over an empty set is undefined; report the 0 sentinel instead.
    let best_trade = real
        .iter()
        .map(|e| e.pnl_or_zero())
        .max()
        .unwrap_or(Decimal::ZERO);
    let worst_trade = real
        .iter()
        .map(|e| e.pnl_or_zero())
        .min()
        .unwrap_or(Decimal::ZERO);

    let r_values: Vec<Decimal> = real
        .iter()
        .filter(|e| has_r_multiple(e))
        .map(|e| r_multiple(e))
        .collect();
    let avg_r_multiple = if r_values.is_empty() {
        Decimal::ZERO
    } else {
        r_values.iter().copied().sum::<Decimal>() / Decimal::from(r_values.len() as i64)
    };

    let capital = account.capital_base();
    let roi = if capital.is_zero() {
        Decimal::ZERO
    } else {
        total_pnl / capital * Decimal::ONE_HUNDRED
    };

    AccountPerformance {
        total_pnl,
        real_trades: real.len(),
        winning_trades: winning,
        losing_trades: losing,
        win_rate,
        best_trade,
        worst_trade,
        avg_r_multiple,
        roi,
    }
}

/// Count of all entries (trades and capital movements) owned by an account.
pub fn entry_count(account_id: Uuid, entries: &[LedgerEntry]) -> usize {
    entries.iter().filter(|e| e.account_id == account_id).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
