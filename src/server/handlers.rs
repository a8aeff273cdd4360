//! Cash card HTTP handlers
//!
//! Thin adapters: extract the caller and parameters, call [`CardService`],
//! and map the outcome onto a status code.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::core::auth::{AuthPolicy, AuthProvider};
use crate::core::card::{Card, CardId, CardPayload};
use crate::core::error::CardError;
use crate::core::query::QueryParams;
use crate::core::service::CardService;
use crate::server::extractors::Caller;

/// Base path of the card resource
pub const CARDS_PATH: &str = "/cashcards";

/// Shared state for the card routes
#[derive(Clone)]
pub struct CardAppState {
    pub service: Arc<CardService>,
    pub auth: Arc<dyn AuthProvider>,
    pub policy: Arc<AuthPolicy>,
}

fn parse_id(raw: &str) -> Result<CardId, CardError> {
    raw.parse::<CardId>()
        .map_err(|_| CardError::invalid("id", format!("'{}' is not a card id", raw)))
}

pub async fn get_card(
    State(state): State<CardAppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> Result<Json<Card>, CardError> {
    let id = parse_id(&id)?;
    state.service.fetch_one(id, &caller).await.map(Json)
}

pub async fn list_cards(
    State(state): State<CardAppState>,
    Caller(caller): Caller,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<Card>>, CardError> {
    let window = state.service.list(&caller, &params).await?;
    Ok(Json(window.cards))
}

pub async fn create_card(
    State(state): State<CardAppState>,
    Caller(caller): Caller,
    Json(payload): Json<CardPayload>,
) -> Result<impl IntoResponse, CardError> {
    let card = state.service.create(payload, &caller).await?;
    let location = format!("{}/{}", CARDS_PATH, card.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

pub async fn update_card(
    State(state): State<CardAppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(payload): Json<CardPayload>,
) -> Result<StatusCode, CardError> {
    let id = parse_id(&id)?;
    state.service.update(id, &caller, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_card(
    State(state): State<CardAppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, CardError> {
    let id = parse_id(&id)?;
    state.service.delete(id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
