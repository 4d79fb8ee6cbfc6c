//! Mutation rules for accounts and their ledgers: account creation,
//! deposits/withdrawals, and the balance rebuild that keeps the cached
//! account totals consistent with the entry set.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Account, EntryStatus, EntryType, LedgerEntry};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("withdrawal of {requested} exceeds current balance {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("initial balance must be greater than zero")]
    NonPositiveInitialBalance,
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Create a new account. The initial balance seeds both the current balance
/// and the deposit total.
pub fn create_account(
    name: &str,
    currency: &str,
    initial_balance: Decimal,
) -> Result<Account, LedgerError> {
    if name.trim().is_empty() {
        return Err(LedgerError::MissingField("name"));
    }
    if initial_balance <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveInitialBalance);
    }

    Ok(Account {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        currency: currency.to_string(),
        initial_balance,
        current_balance: initial_balance,
        total_deposits: initial_balance,
        created_at: Utc::now(),
    })
}

/// Recompute the cached balance fields from the account's full entry set.
/// Call after every entry mutation so the stored totals never drift:
/// `current_balance` tracks closed entries' pnl, `total_deposits` tracks
/// capital contributed (initial balance plus deposit entries).
pub fn rebuild_balances(account: &mut Account, entries: &[LedgerEntry]) {
    let mut realized = Decimal::ZERO;
    let mut deposited = Decimal::ZERO;

    for entry in entries.iter().filter(|e| e.account_id == account.id) {
        if entry.status == EntryStatus::Closed {
            realized += entry.pnl_or_zero();
        }
        if entry.entry_type == EntryType::Deposit {
            deposited += entry.pnl_or_zero();
        }
    }

    account.current_balance = account.initial_balance + realized;
    account.total_deposits = account.initial_balance + deposited;
}

// ---------------------------------------------------------------------------
// Capital movements
// ---------------------------------------------------------------------------

/// Add funds to an account: raises the balance and deposit total and returns
/// the ledger entry recording the movement.
pub fn deposit(
    account: &mut Account,
    amount: Decimal,
    date: NaiveDate,
) -> Result<LedgerEntry, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }

    account.current_balance += amount;
    account.total_deposits += amount;

    Ok(capital_movement(account.id, EntryType::Deposit, amount, date))
}

/// Withdraw funds. A withdrawal larger than the current balance is rejected
/// outright: no entry is created and the account is left untouched.
pub fn withdraw(
    account: &mut Account,
    amount: Decimal,
    date: NaiveDate,
) -> Result<LedgerEntry, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount > account.current_balance {
        return Err(LedgerError::InsufficientBalance {
            requested: amount,
            available: account.current_balance,
        });
    }

    account.current_balance -= amount;

    Ok(capital_movement(
        account.id,
        EntryType::Withdrawal,
        -amount,
        date,
    ))
}

fn capital_movement(
    account_id: Uuid,
    entry_type: EntryType,
    pnl: Decimal,
    date: NaiveDate,
) -> LedgerEntry {
    let label = match entry_type {
        EntryType::Deposit => "Deposit",
        _ => "Withdrawal",
    };

    LedgerEntry {
        id: Uuid::new_v4(),
        account_id,
        date,
        symbol: label.to_string(),
        entry_type,
        lot_size: Decimal::ZERO,
        entry_price: Decimal::ZERO,
        exit_price: None,
        stop_loss: None,
        take_profit: None,
        pnl: Some(pnl),
        status: EntryStatus::Closed,
        emotion: String::new(),
        mistakes: String::new(),
        lessons: String::new(),
        notes: String::new(),
        tags: vec![label.to_lowercase()],
        risk_amount: None,
        screenshot_url: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
