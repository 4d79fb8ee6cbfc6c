use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::LedgerEntry;

/// Bucket an account's realized P&L by calendar day.
///
/// Includes every entry with realized status (closed or stopped) — which
/// covers deposits and withdrawals, since those are always closed — and sums
/// pnl per date with missing treated as zero. Days without entries are simply
/// absent; callers render absence as zero. Magnitude banding for the heatmap
/// is a display concern and does not live here.
pub fn daily_pnl(account_id: Uuid, entries: &[LedgerEntry]) -> BTreeMap<NaiveDate, Decimal> {
    let mut calendar = BTreeMap::new();

    for entry in entries {
        if entry.account_id != account_id || !entry.status.is_realized() {
            continue;
        }
        *calendar.entry(entry.date).or_insert(Decimal::ZERO) += entry.pnl_or_zero();
    }

    calendar
}
