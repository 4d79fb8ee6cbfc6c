pub mod local;
pub mod postgres;
pub mod record;

pub use local::LocalStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use metrics::counter;
use uuid::Uuid;

use crate::config::{AppConfig, StorageBackend};
use crate::models::{Account, LedgerEntry};

/// The persistence seam: CRUD over the two journal collections. Both the
/// Postgres store and the local JSON store implement this; the gateway picks
/// between them.
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn get_accounts(&self) -> anyhow::Result<Vec<Account>>;
    async fn get_entries(&self) -> anyhow::Result<Vec<LedgerEntry>>;
    async fn save_account(&self, account: &Account) -> anyhow::Result<()>;
    async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()>;
    async fn save_entry(&self, entry: &LedgerEntry) -> anyhow::Result<()>;
    async fn save_entries(&self, entries: &[LedgerEntry]) -> anyhow::Result<()>;
    async fn delete_entry(&self, id: Uuid) -> anyhow::Result<()>;
    /// Deleting an account cascades to all entries referencing it.
    async fn delete_account(&self, id: Uuid) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Persistence gateway with an explicit backend choice and a local fallback.
///
/// In Postgres mode a remote failure logs a warning, bumps the fallback
/// counter, and retries against the local store. Reads never fail: on total
/// failure they return an empty collection and the caller renders "no data".
pub struct Gateway {
    remote: Option<PgStore>,
    local: LocalStore,
}

impl Gateway {
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let local = LocalStore::new(&config.local_data_dir);

        let remote = match config.storage_backend {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for the postgres backend"))?;
                tracing::info!("Connecting to database...");
                let store = PgStore::connect(url).await?;
                tracing::info!("Database connected");
                Some(store)
            }
            StorageBackend::Local => {
                tracing::info!(dir = %config.local_data_dir.display(), "Using local JSON store");
                None
            }
        };

        Ok(Self { remote, local })
    }

    /// A gateway over the local store only. Used by tests and by setups with
    /// no database at all.
    pub fn local_only(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            remote: None,
            local: LocalStore::new(dir),
        }
    }

    /// True when the active backend is reachable.
    pub async fn ping(&self) -> bool {
        match &self.remote {
            Some(remote) => remote.ping().await,
            None => true,
        }
    }

    pub async fn get_accounts(&self) -> Vec<Account> {
        if let Some(remote) = &self.remote {
            match remote.get_accounts().await {
                Ok(accounts) => return accounts,
                Err(e) => fallback("get_accounts", &e),
            }
        }
        match self.local.get_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::error!(error = %e, "Local account read failed");
                Vec::new()
            }
        }
    }

    pub async fn get_entries(&self) -> Vec<LedgerEntry> {
        if let Some(remote) = &self.remote {
            match remote.get_entries().await {
                Ok(entries) => return entries,
                Err(e) => fallback("get_entries", &e),
            }
        }
        match self.local.get_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "Local entry read failed");
                Vec::new()
            }
        }
    }

    pub async fn save_account(&self, account: &Account) -> anyhow::Result<()> {
        if let Some(remote) = &self.remote {
            match remote.save_account(account).await {
                Ok(()) => return Ok(()),
                Err(e) => fallback("save_account", &e),
            }
        }
        self.local.save_account(account).await
    }

    pub async fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()> {
        if let Some(remote) = &self.remote {
            match remote.save_accounts(accounts).await {
                Ok(()) => return Ok(()),
                Err(e) => fallback("save_accounts", &e),
            }
        }
        self.local.save_accounts(accounts).await
    }

    pub async fn save_entry(&self, entry: &LedgerEntry) -> anyhow::Result<()> {
        if let Some(remote) = &self.remote {
            match remote.save_entry(entry).await {
                Ok(()) => return Ok(()),
                Err(e) => fallback("save_entry", &e),
            }
        }
        self.local.save_entry(entry).await
    }

    pub async fn save_entries(&self, entries: &[LedgerEntry]) -> anyhow::Result<()> {
        if let Some(remote) = &self.remote {
            match remote.save_entries(entries).await {
                Ok(()) => return Ok(()),
                Err(e) => fallback("save_entries", &e),
            }
        }
        self.local.save_entries(entries).await
    }

    /// Deletes do not fall back: silently removing from one store while the
    /// other still holds the record would resurrect it on the next sync.
    pub async fn delete_entry(&self, id: Uuid) -> anyhow::Result<()> {
        match &self.remote {
            Some(remote) => remote.delete_entry(id).await,
            None => self.local.delete_entry(id).await,
        }
    }

    pub async fn delete_account(&self, id: Uuid) -> anyhow::Result<()> {
        match &self.remote {
            Some(remote) => remote.delete_account(id).await,
            None => self.local.delete_account(id).await,
        }
    }
}

fn fallback(operation: &'static str, error: &anyhow::Error) {
    tracing::warn!(operation, error = %error, "Remote store failed, falling back to local store");
    counter!("storage_fallbacks_total").increment(1);
}
