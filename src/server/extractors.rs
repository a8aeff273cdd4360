//! Axum extractors for the card routes
//!
//! [`Caller`] turns HTTP Basic credentials into a [`CallerIdentity`],
//! applying the role policy before any handler runs.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::auth::{AuthError, CallerIdentity, Credentials};
use crate::server::handlers::CardAppState;

/// The authenticated caller of a card route
#[derive(Debug, Clone)]
pub struct Caller(pub CallerIdentity);

impl FromRequestParts<CardAppState> for Caller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &CardAppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = basic_credentials(&parts.headers)?;

        let context = state
            .auth
            .authenticate(&credentials)
            .await
            .inspect_err(|_| {
                tracing::warn!(username = %credentials.username, "rejected credentials");
            })?;

        if !state.policy.check(&context) {
            tracing::warn!(username = %context.identity, "caller lacks the card owner role");
            return Err(AuthError::Forbidden {
                username: context.identity.to_string(),
            });
        }

        Ok(Caller(context.identity))
    }
}

/// Decode an `Authorization: Basic ...` header
pub fn basic_credentials(headers: &HeaderMap) -> Result<Credentials, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredentials)?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::InvalidCredentials)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::MissingCredentials);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::InvalidCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidCredentials)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(Credentials::new(username, password))
}
