//! Core module containing the card model, store contract, and operations

pub mod auth;
pub mod card;
pub mod error;
pub mod guard;
pub mod query;
pub mod service;
pub mod store;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, CallerIdentity, Role, StaticAuthProvider};
pub use card::{Card, CardId, CardPayload};
pub use error::{CardError, CardResult, StorageError};
pub use guard::OwnershipGuard;
pub use query::{CardPage, PageRequest, PageWindow, PaginationConfig, QueryParams};
pub use service::CardService;
pub use store::CardStore;
