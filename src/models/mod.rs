pub mod account;
pub mod entry;

pub use account::Account;
pub use entry::LedgerEntry;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntryType
// ---------------------------------------------------------------------------

/// What kind of event a ledger entry records: a market trade (buy/sell) or a
/// capital movement (deposit/withdrawal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
}

impl EntryType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" => Some(EntryType::Buy),
            "sell" => Some(EntryType::Sell),
            "deposit" => Some(EntryType::Deposit),
            "withdrawal" => Some(EntryType::Withdrawal),
            _ => None,
        }
    }

    /// True for buy/sell entries. Only real trades count toward performance
    /// statistics; deposits and withdrawals only move the balance.
    pub fn is_real_trade(&self) -> bool {
        matches!(self, EntryType::Buy | EntryType::Sell)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Buy => write!(f, "buy"),
            EntryType::Sell => write!(f, "sell"),
            EntryType::Deposit => write!(f, "deposit"),
            EntryType::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

// ---------------------------------------------------------------------------
// EntryStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Open,
    Closed,
    Stopped,
}

impl EntryStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(EntryStatus::Open),
            "closed" => Some(EntryStatus::Closed),
            "stopped" => Some(EntryStatus::Stopped),
            _ => None,
        }
    }

    /// Closed and stopped entries carry realized P&L.
    pub fn is_realized(&self) -> bool {
        matches!(self, EntryStatus::Closed | EntryStatus::Stopped)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Open => write!(f, "open"),
            EntryStatus::Closed => write!(f, "closed"),
            EntryStatus::Stopped => write!(f, "stopped"),
        }
    }
}
