//! ServerBuilder for fluent API to build the card HTTP server

use super::handlers::CardAppState;
use super::router::{build_card_routes, health_routes};
use crate::config::AppConfig;
use crate::core::auth::{AuthPolicy, AuthProvider, StaticAuthProvider};
use crate::core::query::PaginationConfig;
use crate::core::service::CardService;
use crate::core::store::CardStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder wiring a store and an auth provider into a router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryCardStore::new())
///     .with_auth_provider(StaticAuthProvider::new(users))
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CardStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
    policy: AuthPolicy,
    pagination: PaginationConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            auth: None,
            policy: AuthPolicy::card_owners(),
            pagination: PaginationConfig::default(),
        }
    }

    /// Builder preloaded with the users and paging limits of `config`
    pub fn from_config(config: &AppConfig, store: Arc<dyn CardStore>) -> Self {
        Self::new()
            .with_shared_store(store)
            .with_auth_provider(StaticAuthProvider::new(config.users.clone()))
            .with_pagination(config.pagination)
    }

    /// Set the card store (required)
    pub fn with_store(self, store: impl CardStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(mut self, store: Arc<dyn CardStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the credential verifier (required)
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Replace the default `HasRole([CARD_OWNER])` policy
    pub fn with_policy(mut self, policy: AuthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Build the router with card and health routes
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("CardStore is required. Call .with_store()"))?;
        let auth = self.auth.ok_or_else(|| {
            anyhow::anyhow!("AuthProvider is required. Call .with_auth_provider()")
        })?;

        let state = CardAppState {
            service: Arc::new(CardService::with_pagination(store, self.pagination)),
            auth,
            policy: Arc::new(self.policy),
        };

        let app = health_routes().merge(build_card_routes(state));

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
