//! # Cashcard
//!
//! An HTTP service where each authenticated user manages a private set of
//! cash cards: create, fetch, list (paged and sorted), update the amount,
//! and delete.
//!
//! ## Features
//!
//! - **Ownership-scoped store**: every lookup and listing names the owner;
//!   another user's card is indistinguishable from a missing one
//! - **Deterministic paging**: sort by amount in either direction, ties
//!   broken by id, windows past the end are empty
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the
//!   `postgres` feature
//! - **Basic auth with roles**: only `CARD_OWNER` users reach the card routes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cashcard::prelude::*;
//!
//! let config = AppConfig::default_config();
//! let store = Arc::new(InMemoryCardStore::with_records(config.seed.clone()));
//! ServerBuilder::from_config(&config, store)
//!     .serve(&config.server.bind)
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{
            AuthContext, AuthError, AuthPolicy, AuthProvider, CallerIdentity, Credentials, Role,
            StaticAuthProvider, UserAccount,
        },
        card::{Card, CardId, CardPayload},
        error::{CardError, CardResult, ErrorResponse, StorageError},
        guard::OwnershipGuard,
        query::{
            CardPage, PageRequest, PageWindow, PaginationConfig, QueryParams, SortDirection,
            SortField,
        },
        service::CardService,
        store::CardStore,
    };

    // === Storage ===
    pub use crate::storage::InMemoryCardStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresCardStore;

    // === Config ===
    pub use crate::config::{AppConfig, ServerConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::{CARDS_PATH, CardAppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
