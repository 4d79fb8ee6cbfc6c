use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::models::{EntryStatus, LedgerEntry};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
}

impl fmt::Display for StreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakKind::Win => write!(f, "win"),
            StreakKind::Loss => write!(f, "loss"),
        }
    }
}

/// How to classify a closed trade whose pnl was never filled in.
///
/// The journal historically counted such trades as losses (`pnl ?? 0 > 0`
/// is false); `BreaksStreak` instead treats them as genuinely unresolved and
/// ends the run there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPnl {
    #[default]
    CountsAsLoss,
    BreaksStreak,
}

/// The run of consecutive most-recent closed trades sharing one outcome.
/// `kind` is `None` (and `length` 0) when no closed trades exist.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Streak {
    pub length: u32,
    pub kind: Option<StreakKind>,
}

impl Streak {
    pub const NONE: Streak = Streak { length: 0, kind: None };
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Walk the account's closed buy/sell entries from most recent backwards and
/// count how long the current win (or loss) run is.
pub fn current_streak(
    account_id: Uuid,
    entries: &[LedgerEntry],
    policy: UnresolvedPnl,
) -> Streak {
    let mut closed: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| {
            e.account_id == account_id && e.is_real_trade() && e.status == EntryStatus::Closed
        })
        .collect();
    // Most recent first; sort is stable, so same-day entries keep input order.
    closed.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = Streak::NONE;

    for entry in closed {
        let outcome = match entry.pnl {
            Some(p) if p > Decimal::ZERO => StreakKind::Win,
            Some(_) => StreakKind::Loss,
            None => match policy {
                UnresolvedPnl::CountsAsLoss => StreakKind::Loss,
                UnresolvedPnl::BreaksStreak => break,
            },
        };

        match streak.kind {
            None => {
                streak = Streak {
                    length: 1,
                    kind: Some(outcome),
                };
            }
            Some(kind) if kind == outcome => streak.length += 1,
            Some(_) => break,
        }
    }

    streak
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
