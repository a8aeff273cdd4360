//! Cash card server
//!
//! Usage: `cashcard [config.yaml]`. The path may also come from
//! `CASHCARD_CONFIG`; without either, the built-in demo configuration is used.

use anyhow::Result;
use cashcard::config::AppConfig;
use cashcard::server::ServerBuilder;
use cashcard::storage::open_store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CASHCARD_CONFIG").ok())
    {
        Some(path) => {
            tracing::info!(path = %path, "loading configuration");
            AppConfig::from_yaml_file(&path)?
        }
        None => {
            tracing::info!("no configuration given, using demo defaults");
            AppConfig::default_config()
        }
    };

    let store = open_store(&config.storage, config.seed.clone()).await?;

    ServerBuilder::from_config(&config, store)
        .serve(&config.server.bind)
        .await
}
