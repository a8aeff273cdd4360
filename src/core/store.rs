//! Record store contract for cash cards

use crate::core::card::{Card, CardId};
use crate::core::error::StorageError;
use crate::core::query::{CardPage, PageRequest};
use async_trait::async_trait;

/// Durable table of cards
///
/// Every owner-scoped method takes the owner as a required argument; there
/// is no way to list or look up cards without naming one. Each call is
/// expected to be atomic for the single record it touches.
///
/// Implementations must order [`list_by_owner`](CardStore::list_by_owner)
/// results by the request's sort field and direction, breaking ties by
/// ascending id.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Persist a new card with a freshly minted id
    async fn create(&self, amount: f64, owner: &str) -> Result<Card, StorageError>;

    /// Point lookup matching both id and owner
    ///
    /// Returns `None` when the id is unknown or belongs to another owner.
    async fn get_by_id_and_owner(
        &self,
        id: CardId,
        owner: &str,
    ) -> Result<Option<Card>, StorageError>;

    /// One window of the owner's cards plus the owner's total count
    async fn list_by_owner(
        &self,
        owner: &str,
        request: &PageRequest,
    ) -> Result<CardPage, StorageError>;

    /// Upsert by id; an existing row keeps its owner
    async fn save(&self, card: Card) -> Result<Card, StorageError>;

    async fn exists_by_id_and_owner(&self, id: CardId, owner: &str)
    -> Result<bool, StorageError>;

    /// Unconditional delete; callers verify ownership first
    async fn delete_by_id(&self, id: CardId) -> Result<(), StorageError>;
}
