//! Router builder utilities for card routes

use crate::server::handlers::{
    CARDS_PATH, CardAppState, create_card, delete_card, get_card, list_cards, update_card,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build the card routes
///
/// - GET /cashcards - List the caller's cards (`page`, `size`, `sort`)
/// - POST /cashcards - Create a card owned by the caller
/// - GET /cashcards/{id} - Get one of the caller's cards
/// - PUT /cashcards/{id} - Replace the amount of one of the caller's cards
/// - DELETE /cashcards/{id} - Delete one of the caller's cards
pub fn build_card_routes(state: CardAppState) -> Router {
    Router::new()
        .route(CARDS_PATH, get(list_cards).post(create_card))
        .route(
            &format!("{}/{{id}}", CARDS_PATH),
            get(get_card).put(update_card).delete(delete_card),
        )
        .with_state(state)
}

/// Unauthenticated health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "cashcard"
    }))
}
