//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryCardStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresCardStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::card::Card;
use crate::core::store::CardStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the configured backend and load any `seed` records it lacks
pub async fn open_store(config: &StorageConfig, seed: Vec<Card>) -> Result<Arc<dyn CardStore>> {
    match config.backend {
        StorageBackend::InMemory => {
            tracing::info!(records = seed.len(), "using in-memory card store");
            Ok(Arc::new(InMemoryCardStore::with_records(seed)))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("storage.url is required for postgres"))?;
            let pool = postgres::connect(url, config.max_connections).await?;
            postgres::ensure_schema(&pool).await?;
            let store = PostgresCardStore::new(pool);
            store.seed(&seed).await?;
            tracing::info!(records = seed.len(), "using postgres card store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("postgres backend requested but the `postgres` feature is disabled")
        }
    }
}
