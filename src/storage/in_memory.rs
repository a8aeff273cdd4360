//! In-memory implementation of CardStore for testing and development

use crate::core::card::{Card, CardId};
use crate::core::error::StorageError;
use crate::core::query::{CardPage, PageRequest};
use crate::core::store::CardStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

struct Table {
    cards: BTreeMap<CardId, Card>,
    /// `None` once `i64::MAX` has been handed out or stored
    next_id: Option<i64>,
}

impl Table {
    fn mint_id(&mut self) -> Result<CardId, StorageError> {
        let id = self
            .next_id
            .ok_or_else(|| StorageError::query(BACKEND, "create", "card id space exhausted"))?;
        self.next_id = id.checked_add(1);
        Ok(CardId(id))
    }

    /// Keep the counter ahead of an explicitly stored id
    fn observe(&mut self, id: CardId) {
        if let Some(next) = self.next_id {
            if id.value() >= next {
                self.next_id = id.value().checked_add(1);
            }
        }
    }
}

/// In-memory card store
///
/// Uses RwLock for thread-safe access. Ids come from a counter that only
/// moves forward, so a deleted id is never handed out again.
#[derive(Clone)]
pub struct InMemoryCardStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store preloaded with fixture records
    ///
    /// New ids continue after the largest preloaded id.
    pub fn with_records(records: impl IntoIterator<Item = Card>) -> Self {
        let cards: BTreeMap<CardId, Card> = records.into_iter().map(|c| (c.id, c)).collect();
        let next_id = match cards.keys().next_back() {
            Some(max) => max.value().checked_add(1),
            None => Some(1),
        };
        Self {
            table: Arc::new(RwLock::new(Table { cards, next_id })),
        }
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::poisoned("len"))?;
        Ok(table.cards.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn create(&self, amount: f64, owner: &str) -> Result<Card, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::poisoned("create"))?;

        let card = Card::new(table.mint_id()?, amount, owner);
        table.cards.insert(card.id, card.clone());

        Ok(card)
    }

    async fn get_by_id_and_owner(
        &self,
        id: CardId,
        owner: &str,
    ) -> Result<Option<Card>, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::poisoned("get"))?;

        Ok(table
            .cards
            .get(&id)
            .filter(|card| card.is_owned_by(owner))
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        request: &PageRequest,
    ) -> Result<CardPage, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::poisoned("list"))?;

        let owned: Vec<Card> = table
            .cards
            .values()
            .filter(|card| card.is_owned_by(owner))
            .cloned()
            .collect();
        let total = owned.len();

        Ok(CardPage {
            cards: request.window(owned),
            total,
        })
    }

    async fn save(&self, card: Card) -> Result<Card, StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::poisoned("save"))?;

        table.observe(card.id);

        // Owner is written on insert only
        let stored = match table.cards.get(&card.id) {
            Some(existing) => existing.with_amount(card.amount),
            None => card,
        };
        table.cards.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn exists_by_id_and_owner(
        &self,
        id: CardId,
        owner: &str,
    ) -> Result<bool, StorageError> {
        let table = self
            .table
            .read()
            .map_err(|_| StorageError::poisoned("exists"))?;

        Ok(table
            .cards
            .get(&id)
            .is_some_and(|card| card.is_owned_by(owner)))
    }

    async fn delete_by_id(&self, id: CardId) -> Result<(), StorageError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StorageError::poisoned("delete"))?;

        table.cards.remove(&id);

        Ok(())
    }
}
