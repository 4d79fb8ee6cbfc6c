use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::LedgerEntry;

#[derive(Debug, Clone, Serialize)]
pub struct TagStats {
    pub tag: String,
    pub trades: usize,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionStats {
    pub emotion: String,
    pub trades: usize,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub win_rate: Decimal,
}

/// Per-tag performance over an account's buy/sell entries. A trade with
/// several tags contributes to each of them. Output is sorted by tag name.
pub fn tag_breakdown(account_id: Uuid, entries: &[LedgerEntry]) -> Vec<TagStats> {
    let mut groups: BTreeMap<&str, Vec<&LedgerEntry>> = BTreeMap::new();

    for entry in real_trades(account_id, entries) {
        for tag in &entry.tags {
            groups.entry(tag).or_default().push(entry);
        }
    }

    groups
        .into_iter()
        .map(|(tag, trades)| TagStats {
            tag: tag.to_string(),
            trades: trades.len(),
            total_pnl: trades.iter().map(|e| e.pnl_or_zero()).sum(),
            win_rate: win_rate(&trades),
        })
        .collect()
}

/// Per-emotion performance over an account's buy/sell entries; entries with
/// a blank emotion are skipped. Output is sorted by emotion.
pub fn emotion_breakdown(account_id: Uuid, entries: &[LedgerEntry]) -> Vec<EmotionStats> {
    let mut groups: BTreeMap<&str, Vec<&LedgerEntry>> = BTreeMap::new();

    for entry in real_trades(account_id, entries) {
        if !entry.emotion.is_empty() {
            groups.entry(&entry.emotion).or_default().push(entry);
        }
    }

    groups
        .into_iter()
        .map(|(emotion, trades)| {
            let total_pnl: Decimal = trades.iter().map(|e| e.pnl_or_zero()).sum();
            EmotionStats {
                emotion: emotion.to_string(),
                trades: trades.len(),
                total_pnl,
                avg_pnl: total_pnl / Decimal::from(trades.len() as i64),
                win_rate: win_rate(&trades),
            }
        })
        .collect()
}

fn real_trades<'a>(
    account_id: Uuid,
    entries: &'a [LedgerEntry],
) -> impl Iterator<Item = &'a LedgerEntry> {
    entries
        .iter()
        .filter(move |e| e.account_id == account_id && e.is_real_trade())
}

/// Same formula as the per-account win rate, scoped to a subset.
fn win_rate(trades: &[&LedgerEntry]) -> Decimal {
    if trades.is_empty() {
        return Decimal::ZERO;
    }
    let wins = trades.iter().filter(|e| e.is_win()).count();
    Decimal::from(wins as i64) / Decimal::from(trades.len() as i64) * Decimal::ONE_HUNDRED
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
    fn test_tag_breakdown_groups_and_scores() {
        let acct = account(1000);
        let mut a = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(100));
        a.tags = vec!["breakout".into(), "news".into()];
        let mut b = trade(acct.id, EntryType::Sell, EntryStatus::Closed, Some(-40));
        b.tags = vec!["breakout".into()];
        let mut deposit = trade(acct.id, EntryType::Deposit, EntryStatus::Closed, Some(500));
        deposit.tags = vec!["deposit".into()];

        let stats = tag_breakdown(acct.id, &[a, b, deposit]);
        assert_eq!(stats.len(), 2);

        let breakout = stats.iter().find(|s| s.tag == "breakout").unwrap();
        assert_eq!(breakout.trades, 2);
        assert_eq!(breakout.total_pnl, Decimal::from(60));
        assert_eq!(breakout.win_rate, Decimal::from(50));

        // The internal deposit tag never shows up.
        assert!(stats.iter().all(|s| s.tag != "deposit"));
    }

    #[test]
    fn test_emotion_breakdown_averages() {
        let acct = account(1000);
        let mut a = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(90));
        a.emotion = "confident".into();
        let mut b = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(-30));
        b.emotion = "confident".into();
        let blank = trade(acct.id, EntryType::Buy, EntryStatus::Closed, Some(10));

        let stats = emotion_breakdown(acct.id, &[a, b, blank]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].emotion, "confident");
        assert_eq!(stats[0].trades, 2);
        assert_eq!(stats[0].total_pnl, Decimal::from(60));
        assert_eq!(stats[0].avg_pnl, Decimal::from(30));
    }

    #[test]
    fn test_breakdowns_empty_account() {
        let acct = account(1000);
        assert!(tag_breakdown(acct.id, &[]).is_empty());
        assert!(emotion_breakdown(acct.id, &[]).is_empty());
    }
}
