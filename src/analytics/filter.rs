use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{EntryStatus, EntryType, LedgerEntry};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The combined status-or-result filter dimension. `Open`/`Closed`/`Stopped`
/// match the status directly on any entry type; `Win`/`Loss` additionally
/// require a closed buy/sell entry with signed pnl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Open,
    Closed,
    Stopped,
    Win,
    Loss,
}

impl Outcome {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Outcome::Open),
            "closed" => Some(Outcome::Closed),
            "stopped" => Some(Outcome::Stopped),
            "win" => Some(Outcome::Win),
            "loss" => Some(Outcome::Loss),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EntryFilter
// ---------------------------------------------------------------------------

/// Conjunctive filter over ledger entries. `None` on any dimension means
/// "no constraint"; all set dimensions must match.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub account_id: Option<Uuid>,
    pub outcome: Option<Outcome>,
    pub emotion: Option<String>,
    /// Tags only ever match buy/sell entries; the internal deposit/withdrawal
    /// tags are not exposed to tag filtering.
    pub tag: Option<String>,
    pub entry_type: Option<EntryType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(account_id) = self.account_id {
            if entry.account_id != account_id {
                return false;
            }
        }

        if let Some(outcome) = self.outcome {
            let ok = match outcome {
                Outcome::Open => entry.status == EntryStatus::Open,
                Outcome::Closed => entry.status == EntryStatus::Closed,
                Outcome::Stopped => entry.status == EntryStatus::Stopped,
                Outcome::Win => {
                    entry.is_real_trade()
                        && entry.status == EntryStatus::Closed
                        && entry.pnl_or_zero() > Decimal::ZERO
                }
                Outcome::Loss => {
                    entry.is_real_trade()
                        && entry.status == EntryStatus::Closed
                        && entry.pnl_or_zero() < Decimal::ZERO
                }
            };
            if !ok {
                return false;
            }
        }

        if let Some(emotion) = &self.emotion {
            if &entry.emotion != emotion {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !entry.is_real_trade() || !entry.tags.iter().any(|t| t == tag) {
                return false;
            }
        }

        if let Some(entry_type) = self.entry_type {
            if entry.entry_type != entry_type {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            if entry.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if entry.date > to {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::{account, trade};
    use crate::models::{EntryStatus, EntryType};

    #[test]
    fn test_default_filter_matches_everything() {
        let acct = account(1000);
        let entries = vec![
            trade(acct.id, EntryType::Buy, EntryStatus::Open, None),
            trade(acct.id, EntryType::Deposit, EntryStatus::Closed, Some(500)),
        ];
        assert_eq!(EntryFilter::default().apply(&entries).len(), 2);
    }

    #[test]
    fn test_win_filter_excludes_capital_movements() {
        let acct = account(1000);
        let entries = vec![
            trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(50)),
            trade(acct.id, EntryType::Sell, EntryStatus::Closed, Some(-20)),
            trade(acct.id, EntryType::Buy, EntryStatus::Open, Some(10)),
            // Positive pnl, but a deposit is never a "win".
            trade(acct.id, EntryType::Deposit, EntryStatus::Closed, Some(500)),
        ];
        let filter = EntryFilter {
            outcome: Some(Outcome::Win),
            ..Default::default()
        };
        let matched = filter.apply(&entries);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].pnl_or_zero(), Decimal::from(50));
    }

    #[test]
    fn test_loss_filter_requires_closed_status() {
        let acct = account(1000);
        let entries = vec![
            trade(acct.id, EntryType::Buy, EntryStatus::Stopped, Some(-30)),
            trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(-30)),
        ];
        let filter = EntryFilter {
            outcome: Some(Outcome::Loss),
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries).len(), 1);
    }

    #[test]
    fn test_status_filters_apply_to_any_type() {
        let acct = account(1000);
        let entries = vec![
            trade(acct.id, EntryType::Buy, EntryStatus::Open, None),
            trade(acct.id, EntryType::Withdrawal, EntryStatus::Closed, Some(-100)),
        ];
        let filter = EntryFilter {
            outcome: Some(Outcome::Closed),
            ..Default::default()
        };
        let matched = filter.apply(&entries);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].entry_type, EntryType::Withdrawal);
    }

    #[test]
    fn test_tag_filter_skips_capital_movements() {
        let acct = account(1000);
        let mut tagged = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(10));
        tagged.tags = vec!["breakout".into()];
        let mut deposit = trade(acct.id, EntryType::Deposit, EntryStatus::Closed, Some(500));
        deposit.tags = vec!["deposit".into()];

        let filter = EntryFilter {
            tag: Some("breakout".into()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&[tagged.clone(), deposit.clone()]).len(), 1);

        // Even asking for the internal tag does not surface the deposit.
        let filter = EntryFilter {
            tag: Some("deposit".into()),
            ..Default::default()
        };
        assert!(filter.apply(&[tagged, deposit]).is_empty());
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let acct = account(1000);
        let mut hit = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(10));
        hit.emotion = "confident".into();
        let mut wrong_emotion = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(10));
        wrong_emotion.emotion = "fearful".into();

        let filter = EntryFilter {
            outcome: Some(Outcome::Win),
            emotion: Some("confident".into()),
            entry_type: Some(EntryType::Buy),
            ..Default::default()
        };
        assert_eq!(filter.apply(&[hit, wrong_emotion]).len(), 1);
    }
}
