//! Ownership checks layered over a [`CardStore`]
//!
//! A card owned by someone else is reported exactly like a card that does
//! not exist: the same [`CardError::NotFound`] carrying the requested id.

use crate::core::auth::CallerIdentity;
use crate::core::card::{Card, CardId};
use crate::core::error::CardError;
use crate::core::query::{CardPage, PageRequest};
use crate::core::store::CardStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct OwnershipGuard {
    store: Arc<dyn CardStore>,
}

impl OwnershipGuard {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CardStore> {
        &self.store
    }

    /// The caller's card, or `NotFound`
    pub async fn fetch_owned(&self, id: CardId, caller: &CallerIdentity) -> Result<Card, CardError> {
        self.store
            .get_by_id_and_owner(id, caller.as_str())
            .await?
            .ok_or_else(|| CardError::not_found(id))
    }

    /// Succeeds only if the caller owns `id`
    pub async fn ensure_owned(&self, id: CardId, caller: &CallerIdentity) -> Result<(), CardError> {
        if self
            .store
            .exists_by_id_and_owner(id, caller.as_str())
            .await?
        {
            Ok(())
        } else {
            Err(CardError::not_found(id))
        }
    }

    /// The caller's cards only; the owner filter is applied by the store query
    pub async fn list_owned(
        &self,
        caller: &CallerIdentity,
        request: &PageRequest,
    ) -> Result<CardPage, CardError> {
        Ok(self.store.list_by_owner(caller.as_str(), request).await?)
    }
}
