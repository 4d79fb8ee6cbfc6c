use std::env;
use std::path::PathBuf;

use crate::analytics::UnresolvedPnl;

const DEFAULT_DATA_DIR: &str = "./data";

/// Which durable store the gateway talks to. An explicit constructor input,
/// not a process-wide switch, so tests can pin the backend per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Local,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "remote" => Some(StorageBackend::Postgres),
            "local" => Some(StorageBackend::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Persistence
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub local_data_dir: PathBuf,

    // API token for the credential gate (optional — unset disables auth)
    pub api_token: Option<String>,

    // Streak handling for closed trades whose pnl was never filled in
    pub unresolved_pnl_breaks_streak: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => StorageBackend::from_str(&raw)
                .ok_or_else(|| anyhow::anyhow!("STORAGE_BACKEND must be 'postgres' or 'local'"))?,
            Err(_) => StorageBackend::Local,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be set when STORAGE_BACKEND=postgres"
            ));
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            storage_backend,
            database_url,
            local_data_dir: env::var("LOCAL_DATA_DIR")
                .unwrap_or_else(|_| DEFAULT_DATA_DIR.into())
                .into(),

            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),

            unresolved_pnl_breaks_streak: env::var("STREAK_UNRESOLVED_BREAKS")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn streak_policy(&self) -> UnresolvedPnl {
        if self.unresolved_pnl_breaks_streak {
            UnresolvedPnl::BreaksStreak
        } else {
            UnresolvedPnl::CountsAsLoss
        }
    }
}
