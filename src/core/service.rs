//! Card operations facade
//!
//! Composes the [`OwnershipGuard`] and page resolution over a [`CardStore`].
//! Each method is one self-contained transition; nothing is kept between
//! calls. The caller identity is always an explicit argument.

use crate::core::auth::CallerIdentity;
use crate::core::card::{Card, CardId, CardPayload};
use crate::core::error::CardError;
use crate::core::guard::OwnershipGuard;
use crate::core::query::{PageRequest, PageWindow, PaginationConfig, QueryParams};
use crate::core::store::CardStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CardService {
    guard: OwnershipGuard,
    pagination: PaginationConfig,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self::with_pagination(store, PaginationConfig::default())
    }

    pub fn with_pagination(store: Arc<dyn CardStore>, pagination: PaginationConfig) -> Self {
        Self {
            guard: OwnershipGuard::new(store),
            pagination,
        }
    }

    /// Create a card owned by the caller
    pub async fn create(
        &self,
        payload: CardPayload,
        caller: &CallerIdentity,
    ) -> Result<Card, CardError> {
        let card = self
            .guard
            .store()
            .create(payload.amount, caller.as_str())
            .await?;
        tracing::info!(card_id = %card.id, owner = %caller, "created cash card");
        Ok(card)
    }

    pub async fn fetch_one(&self, id: CardId, caller: &CallerIdentity) -> Result<Card, CardError> {
        tracing::debug!(card_id = %id, caller = %caller, "fetching cash card");
        self.guard.fetch_owned(id, caller).await
    }

    /// List the caller's cards from raw query parameters
    pub async fn list(
        &self,
        caller: &CallerIdentity,
        params: &QueryParams,
    ) -> Result<PageWindow, CardError> {
        let request = params.resolve(&self.pagination)?;
        self.list_page(caller, &request).await
    }

    pub async fn list_page(
        &self,
        caller: &CallerIdentity,
        request: &PageRequest,
    ) -> Result<PageWindow, CardError> {
        let page = self.guard.list_owned(caller, request).await?;
        tracing::debug!(
            caller = %caller,
            page = request.page,
            size = request.size,
            direction = %request.direction,
            returned = page.cards.len(),
            total = page.total,
            "listed cash cards"
        );
        Ok(PageWindow::new(request, page))
    }

    /// Overwrite the amount of one of the caller's cards
    pub async fn update(
        &self,
        id: CardId,
        caller: &CallerIdentity,
        payload: CardPayload,
    ) -> Result<Card, CardError> {
        let existing = self.guard.fetch_owned(id, caller).await?;
        let saved = self
            .guard
            .store()
            .save(existing.with_amount(payload.amount))
            .await?;
        tracing::info!(card_id = %id, owner = %caller, "updated cash card");
        Ok(saved)
    }

    pub async fn delete(&self, id: CardId, caller: &CallerIdentity) -> Result<(), CardError> {
        self.guard.ensure_owned(id, caller).await?;
        self.guard.store().delete_by_id(id).await?;
        tracing::info!(card_id = %id, owner = %caller, "deleted cash card");
        Ok(())
    }
}
