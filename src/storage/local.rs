use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

use super::record::{AccountRecord, EntryRecord};
use super::JournalStore;
use crate::models::{Account, LedgerEntry};

const ACCOUNTS_FILE: &str = "trading-accounts.json";
const ENTRIES_FILE: &str = "trading-journal.json";

/// Fallback store: one JSON file per collection under a data directory.
/// Good enough for a single user; every write rewrites the whole file.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> anyhow::Result<Vec<T>> {
        match tokio::fs::read(self.dir.join(file)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write<T: Serialize>(&self, file: &str, items: &[T]) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(self.dir.join(file), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl JournalStore for LocalStore {
    async fn get_accounts(&self) -> anyhow::Result<Vec<Account>> {
        let records: Vec<AccountRecord> = self.read(ACCOUNTS_FILE).await?;
        Ok(records.into_iter().map(AccountRecord::into_model).collect())
    }

    async fn get_entries(&self) -> anyhow::Result<Vec<LedgerEntry>> {
        let records: Vec<EntryRecord> = self.read(ENTRIES_FILE).await?;
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
        let mut records: Vec<AccountRecord> = self.read(ACCOUNTS_FILE).await?;
        let record = AccountRecord::from_model(account);

        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write(ACCOUNTS_FILE, &records).await
    }

    async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()> {
        let records: Vec<AccountRecord> = accounts.iter().map(AccountRecord::from_model).collect();
        self.write(ACCOUNTS_FILE, &records).await
    }

    async fn save_entry(&self, entry: &LedgerEntry) -> anyhow::Result<()> {
        let mut records: Vec<EntryRecord> = self.read(ENTRIES_FILE).await?;
        let record = EntryRecord::from_model(entry);

        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write(ENTRIES_FILE, &records).await
    }

    async fn save_entries(&self, entries: &[LedgerEntry]) -> anyhow::Result<()> {
        let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from_model).collect();
        self.write(ENTRIES_FILE, &records).await
    }

    async fn delete_entry(&self, id: Uuid) -> anyhow::Result<()> {
        let mut records: Vec<EntryRecord> = self.read(ENTRIES_FILE).await?;
        records.retain(|r| r.id != id);
        self.write(ENTRIES_FILE, &records).await
    }

    async fn delete_account(&self, id: Uuid) -> anyhow::Result<()> {
        let mut accounts: Vec<AccountRecord> = self.read(ACCOUNTS_FILE).await?;
        accounts.retain(|r| r.id != id);
        self.write(ACCOUNTS_FILE, &accounts).await?;

        // Cascade: drop every entry owned by the account.
        let mut entries: Vec<EntryRecord> = self.read(ENTRIES_FILE).await?;
        entries.retain(|r| r.account_id != id);
        self.write(ENTRIES_FILE, &entries).await
    }
}
