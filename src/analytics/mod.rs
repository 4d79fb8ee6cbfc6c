//! Pure aggregate computations over an in-memory `(accounts, entries)`
//! snapshot. Nothing here performs I/O or holds state; every function is
//! total over degenerate input (empty collections, missing optional fields,
//! zero denominators) and substitutes defined defaults instead of erroring.

pub mod breakdown;
pub mod calendar;
pub mod filter;
pub mod performance;
pub mod streak;

pub use breakdown::{emotion_breakdown, tag_breakdown, EmotionStats, TagStats};
pub use calendar::daily_pnl;
pub use filter::{EntryFilter, Outcome};
pub use performance::{account_performance, has_r_multiple, r_multiple, AccountPerformance};
pub use streak::{current_streak, Streak, StreakKind, UnresolvedPnl};
