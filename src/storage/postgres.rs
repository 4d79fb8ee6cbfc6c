use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::record::{AccountRecord, EntryRecord};
use super::JournalStore;
use crate::models::{Account, LedgerEntry};

/// Durable store backed by Postgres. Schema lives under `migrations/`;
/// account deletion cascades to entries through the foreign key.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        // Verify connectivity
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl JournalStore for PgStore {
    async fn get_accounts(&self) -> anyhow::Result<Vec<Account>> {
        let records = sqlx::query_as::<_, AccountRecord>(
            "SELECT * FROM accounts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(AccountRecord::into_model).collect())
    }

    async fn get_entries(&self) -> anyhow::Result<Vec<LedgerEntry>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            "SELECT * FROM entries ORDER BY date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .filter_map(|r| {
                let id = r.id;
                let entry = r.into_model();
                if entry.is_none() {
                    tracing::warn!(%id, "Skipping entry with unrecognized type/status");
                }
                entry
            })
            .collect())
    }

    async fn save_account(&self, account: &Account) -> anyhow::Result<()> {
        let record = AccountRecord::from_model(account);

        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, currency, initial_balance, current_balance, total_deposits, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                currency = EXCLUDED.currency,
                initial_balance = EXCLUDED.initial_balance,
                current_balance = EXCLUDED.current_balance,
                total_deposits = EXCLUDED.total_deposits
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.currency)
        .bind(record.initial_balance)
        .bind(record.current_balance)
        .bind(record.total_deposits)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()> {
        for account in accounts {
            self.save_account(account).await?;
        }
        Ok(())
    }

    async fn save_entry(&self, entry: &LedgerEntry) -> anyhow::Result<()> {
        let record = EntryRecord::from_model(entry);

        sqlx::query(
            r#"
            INSERT INTO entries (
                id, account_id, date, symbol, type, lot_size, entry_price,
                exit_price, stop_loss, take_profit, pnl, status, emotion,
                mistakes, lessons, notes, tags, risk_amount, screenshot_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            ON CONFLICT (id) DO UPDATE SET
                account_id = EXCLUDED.account_id,
                date = EXCLUDED.date,
                symbol = EXCLUDED.symbol,
                type = EXCLUDED.type,
                lot_size = EXCLUDED.lot_size,
                entry_price = EXCLUDED.entry_price,
                exit_price = EXCLUDED.exit_price,
                stop_loss = EXCLUDED.stop_loss,
                take_profit = EXCLUDED.take_profit,
                pnl = EXCLUDED.pnl,
                status = EXCLUDED.status,
                emotion = EXCLUDED.emotion,
                mistakes = EXCLUDED.mistakes,
                lessons = EXCLUDED.lessons,
                notes = EXCLUDED.notes,
                tags = EXCLUDED.tags,
                risk_amount = EXCLUDED.risk_amount,
                screenshot_url = EXCLUDED.screenshot_url
            "#,
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(record.date)
        .bind(&record.symbol)
        .bind(&record.entry_type)
        .bind(record.lot_size)
        .bind(record.entry_price)
        .bind(record.exit_price)
        .bind(record.stop_loss)
        .bind(record.take_profit)
        .bind(record.pnl)
        .bind(&record.status)
        .bind(&record.emotion)
        .bind(&record.mistakes)
        .bind(&record.lessons)
        .bind(&record.notes)
        .bind(&record.tags)
        .bind(record.risk_amount)
        .bind(&record.screenshot_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_entries(&self, entries: &[LedgerEntry]) -> anyhow::Result<()> {
        for entry in entries {
            self.save_entry(entry).await?;
        }
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_account(&self, id: Uuid) -> anyhow::Result<()> {
        // Entries go with it via ON DELETE CASCADE.
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
