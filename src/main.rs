use std::sync::Arc;

use tradelog::api::router::create_router;
use tradelog::config::AppConfig;
use tradelog::metrics::init_metrics;
use tradelog::storage::Gateway;
use tradelog::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let gateway = Gateway::from_config(&config).await?;
    let metrics_handle = init_metrics();

    let state = AppState {
        gateway: Arc::new(gateway),
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
