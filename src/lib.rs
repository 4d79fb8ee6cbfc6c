pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod storage;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Gateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
