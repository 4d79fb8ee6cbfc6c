use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A trading account: a named pot of capital in a single currency.
///
/// `current_balance` and `total_deposits` are caches over the account's
/// ledger entries; `ledger::rebuild_balances` recomputes both whenever the
/// entry set changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub current_balance: Decimal,
    pub total_deposits: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Denominator for ROI: cumulative capital contributed. Falls back to the
    /// initial balance for records persisted before deposits were tracked.
    pub fn capital_base(&self) -> Decimal {
        if self.total_deposits > Decimal::ZERO {
            self.total_deposits
        } else {
            self.initial_balance
        }
    }
}
