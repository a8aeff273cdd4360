//! The cash card record and the payload clients are allowed to send

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a card
///
/// Ids are unique across the whole table, not per owner, and are never
/// taken from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl CardId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(CardId)
    }
}

impl From<i64> for CardId {
    fn from(value: i64) -> Self {
        CardId(value)
    }
}

/// A persisted cash card
///
/// `id` and `owner` are fixed at creation. Only `amount` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub amount: f64,
    pub owner: String,
}

impl Card {
    pub fn new(id: impl Into<CardId>, amount: f64, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount,
            owner: owner.into(),
        }
    }

    /// Copy of this card carrying a new amount, same id and owner
    pub fn with_amount(&self, amount: f64) -> Self {
        Self {
            id: self.id,
            amount,
            owner: self.owner.clone(),
        }
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }
}

/// Body accepted by create and update
///
/// Only the amount is read. Any `id` or `owner` the client includes is
/// dropped during deserialization, so those fields can never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CardPayload {
    pub amount: f64,
}
