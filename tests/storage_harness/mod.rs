//! Shared test harness for card store backends
//!
//! Provides fixture helpers and the `card_store_tests!` macro, which runs
//! the full `CardStore` contract against any backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use cashcard::storage::InMemoryCardStore;
//!
//! card_store_tests!(InMemoryCardStore::new());
//! ```

#![allow(dead_code)]

use cashcard::core::card::Card;
use cashcard::core::query::{PageRequest, SortDirection, SortField};
use cashcard::core::store::CardStore;

/// Create cards for `owner` with the given amounts, in order
pub async fn create_all(store: &dyn CardStore, owner: &str, amounts: &[f64]) -> Vec<Card> {
    let mut created = Vec::with_capacity(amounts.len());
    for amount in amounts {
        created.push(store.create(*amount, owner).await.unwrap());
    }
    created
}

pub fn asc(page: usize, size: usize) -> PageRequest {
    PageRequest::new(page, size, SortField::Amount, SortDirection::Asc).unwrap()
}

pub fn desc(page: usize, size: usize) -> PageRequest {
    PageRequest::new(page, size, SortField::Amount, SortDirection::Desc).unwrap()
}

pub fn amounts(cards: &[Card]) -> Vec<f64> {
    cards.iter().map(|c| c.amount).collect()
}

/// Generate a full `CardStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test. For the concurrent test the store must also be
/// `Clone + 'static`.
///
/// # Generated Tests
///
/// - create / get, foreign owner lookup, unknown id
/// - list filtering, sort directions, id tie-break, contiguous windows,
///   windows past the end
/// - save (update, owner kept), exists, delete, delete of a missing id
/// - concurrent creates mint distinct ids
#[macro_export]
macro_rules! card_store_tests {
    ($factory:expr) => {
        mod card_store_contract_tests {
            use super::*;
            use cashcard::core::card::{Card, CardId};
            use cashcard::core::store::CardStore;
            use std::collections::HashSet;

            // ==================================================================
            // Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;
                let created = store.create(250.0, "sarah1").await.unwrap();
                assert_eq!(created.amount, 250.0);
                assert_eq!(created.owner, "sarah1");

                let fetched = store
                    .get_by_id_and_owner(created.id, "sarah1")
                    .await
                    .unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_with_other_owner_is_none() {
                let store = $factory;
                let created = store.create(123.45, "sarah1").await.unwrap();

                let fetched = store
                    .get_by_id_and_owner(created.id, "kumar2")
                    .await
                    .unwrap();
                assert!(fetched.is_none());
            }

            #[tokio::test]
            async fn test_get_unknown_id_is_none() {
                let store = $factory;
                let fetched = store
                    .get_by_id_and_owner(CardId(987_654), "sarah1")
                    .await
                    .unwrap();
                assert!(fetched.is_none());
            }

            #[tokio::test]
            async fn test_create_mints_distinct_ids() {
                let store = $factory;
                let created = create_all(&store, "sarah1", &[1.0, 1.0, 1.0]).await;
                let ids: HashSet<CardId> = created.iter().map(|c| c.id).collect();
                assert_eq!(ids.len(), 3);
            }

            #[tokio::test]
            async fn test_negative_amount_is_stored() {
                let store = $factory;
                let created = store.create(-42.5, "sarah1").await.unwrap();
                let fetched = store
                    .get_by_id_and_owner(created.id, "sarah1")
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(fetched.amount, -42.5);
            }

            // ==================================================================
            // List
            // ==================================================================

            #[tokio::test]
            async fn test_list_only_returns_owner_cards() {
                let store = $factory;
                create_all(&store, "sarah1", &[123.45, 1.0, 150.0]).await;
                create_all(&store, "kumar2", &[200.0]).await;

                let page = store.list_by_owner("sarah1", &asc(0, 20)).await.unwrap();
                assert_eq!(page.total, 3);
                assert!(page.cards.iter().all(|c| c.owner == "sarah1"));
                assert_eq!(amounts(&page.cards), vec![1.0, 123.45, 150.0]);
            }

            #[tokio::test]
            async fn test_list_unknown_owner_is_empty() {
                let store = $factory;
                create_all(&store, "sarah1", &[1.0]).await;

                let page = store.list_by_owner("nobody", &asc(0, 20)).await.unwrap();
                assert!(page.cards.is_empty());
                assert_eq!(page.total, 0);
            }

            #[tokio::test]
            async fn test_list_descending_first_is_max() {
                let store = $factory;
                create_all(&store, "sarah1", &[123.45, 100.0, 150.0]).await;

                let page = store.list_by_owner("sarah1", &desc(0, 1)).await.unwrap();
                assert_eq!(amounts(&page.cards), vec![150.0]);
                assert_eq!(page.total, 3);
            }

            #[tokio::test]
            async fn test_list_ties_break_by_ascending_id() {
                let store = $factory;
                let created = create_all(&store, "sarah1", &[5.0, 5.0, 5.0]).await;
                let mut expected: Vec<CardId> = created.iter().map(|c| c.id).collect();
                expected.sort();

                let asc_ids: Vec<CardId> = store
                    .list_by_owner("sarah1", &asc(0, 10))
                    .await
                    .unwrap()
                    .cards
                    .iter()
                    .map(|c| c.id)
                    .collect();
                let desc_ids: Vec<CardId> = store
                    .list_by_owner("sarah1", &desc(0, 10))
                    .await
                    .unwrap()
                    .cards
                    .iter()
                    .map(|c| c.id)
                    .collect();

                assert_eq!(asc_ids, expected);
                assert_eq!(desc_ids, expected);
            }

            #[tokio::test]
            async fn test_list_windows_are_contiguous() {
                let store = $factory;
                create_all(&store, "sarah1", &[5.0, 1.0, 4.0, 2.0, 3.0]).await;

                let full = store.list_by_owner("sarah1", &asc(0, 10)).await.unwrap();
                let first = store.list_by_owner("sarah1", &asc(0, 2)).await.unwrap();
                let second = store.list_by_owner("sarah1", &asc(1, 2)).await.unwrap();
                let third = store.list_by_owner("sarah1", &asc(2, 2)).await.unwrap();

                let mut stitched: Vec<Card> = first.cards.clone();
                stitched.extend(second.cards.clone());
                stitched.extend(third.cards.clone());

                assert_eq!(stitched, full.cards);
                assert_eq!(third.cards.len(), 1);
            }

            #[tokio::test]
            async fn test_list_past_end_is_empty() {
                let store = $factory;
                create_all(&store, "sarah1", &[1.0, 2.0]).await;

                let page = store.list_by_owner("sarah1", &asc(7, 2)).await.unwrap();
                assert!(page.cards.is_empty());
                assert_eq!(page.total, 2);
            }

            #[tokio::test]
            async fn test_list_is_stable_across_calls() {
                let store = $factory;
                create_all(&store, "sarah1", &[3.0, 3.0, 1.0, 2.0]).await;

                let a = store.list_by_owner("sarah1", &desc(0, 10)).await.unwrap();
                let b = store.list_by_owner("sarah1", &desc(0, 10)).await.unwrap();
                assert_eq!(a, b);
            }

            // ==================================================================
            // Save, Exists, Delete
            // ==================================================================

            #[tokio::test]
            async fn test_save_updates_amount() {
                let store = $factory;
                let created = store.create(123.45, "sarah1").await.unwrap();

                let saved = store.save(created.with_amount(19.99)).await.unwrap();
                assert_eq!(saved.id, created.id);
                assert_eq!(saved.amount, 19.99);

                let fetched = store
                    .get_by_id_and_owner(created.id, "sarah1")
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(fetched.amount, 19.99);
                assert_eq!(fetched.owner, "sarah1");
            }

            #[tokio::test]
            async fn test_save_keeps_owner() {
                let store = $factory;
                let created = store.create(10.0, "sarah1").await.unwrap();

                let hijack = Card::new(created.id, 99.0, "kumar2");
                let saved = store.save(hijack).await.unwrap();
                assert_eq!(saved.owner, "sarah1");

                assert!(
                    store
                        .get_by_id_and_owner(created.id, "kumar2")
                        .await
                        .unwrap()
                        .is_none()
                );
                let kept = store
                    .get_by_id_and_owner(created.id, "sarah1")
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(kept.amount, 99.0);
            }

            #[tokio::test]
            async fn test_exists_by_id_and_owner() {
                let store = $factory;
                let created = store.create(1.0, "sarah1").await.unwrap();

                assert!(store.exists_by_id_and_owner(created.id, "sarah1").await.unwrap());
                assert!(!store.exists_by_id_and_owner(created.id, "kumar2").await.unwrap());
                assert!(!store.exists_by_id_and_owner(CardId(987_654), "sarah1").await.unwrap());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let created = store.create(1.0, "sarah1").await.unwrap();

                store.delete_by_id(created.id).await.unwrap();

                assert!(
                    store
                        .get_by_id_and_owner(created.id, "sarah1")
                        .await
                        .unwrap()
                        .is_none()
                );
                assert!(!store.exists_by_id_and_owner(created.id, "sarah1").await.unwrap());
            }

            #[tokio::test]
            async fn test_delete_nonexistent_is_ok() {
                let store = $factory;
                assert!(store.delete_by_id(CardId(987_654)).await.is_ok());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;
                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.create(i as f64, "sarah1").await.unwrap()
                    }));
                }

                let mut ids = HashSet::new();
                for handle in handles {
                    ids.insert(handle.await.unwrap().id);
                }
                assert_eq!(ids.len(), 10);

                let page = store.list_by_owner("sarah1", &asc(0, 100)).await.unwrap();
                assert_eq!(page.total, 10);
            }
        }
    };
}
