//! Authentication and role gate for the card API
//!
//! Provides:
//! - [`CallerIdentity`]: the authenticated principal threaded through every
//!   facade call
//! - [`AuthPolicy`]: role requirements checked before any ownership check
//! - [`AuthProvider`]: the credential verifier, with a config-backed
//!   [`StaticAuthProvider`]

use async_trait::async_trait;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::core::error::ErrorResponse;

/// Identity of the authenticated caller
///
/// Only the auth layer builds one of these; request bodies never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    CardOwner,
    NonOwner,
}

/// Result of a successful authentication
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: CallerIdentity,
    pub roles: Vec<Role>,
}

impl AuthContext {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Authorization policy for the card routes
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<Role>),
}

impl AuthPolicy {
    /// Policy used by `/cashcards`
    pub fn card_owners() -> Self {
        AuthPolicy::HasRole(vec![Role::CardOwner])
    }

    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Authenticated => true,
            AuthPolicy::HasRole(required) => required.iter().any(|r| context.has_role(*r)),
        }
    }
}

/// Username/password pair presented by a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication required")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("'{username}' is not allowed to access cash cards")]
    Forbidden { username: String },
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "UNAUTHORIZED",
            AuthError::InvalidCredentials => "UNAUTHORIZED",
            AuthError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"cashcards\""),
            );
        }
        response
    }
}

/// Trait for credential verifiers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthContext, AuthError>;
}

/// A configured user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,

    /// Hex-encoded SHA-256 digest of the password
    pub password_sha256: String,

    #[serde(default)]
    pub roles: Vec<Role>,
}

impl UserAccount {
    pub fn with_password(username: &str, password: &str, roles: Vec<Role>) -> Self {
        Self {
            username: username.to_string(),
            password_sha256: password_digest(password),
            roles,
        }
    }
}

/// Hex SHA-256 of a password, the format stored in configuration
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Auth provider backed by a fixed list of accounts
pub struct StaticAuthProvider {
    accounts: HashMap<String, UserAccount>,
}

impl StaticAuthProvider {
    pub fn new(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.username.clone(), a))
                .collect(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthContext, AuthError> {
        // Hash first so unknown users cost the same as wrong passwords
        let presented = password_digest(&credentials.password);
        let account = self.accounts.get(&credentials.username);
        let stored = account
            .map(|a| a.password_sha256.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let matches: bool = presented.as_bytes().ct_eq(stored.as_bytes()).into();

        match account {
            Some(account) if matches => Ok(AuthContext {
                identity: CallerIdentity::new(account.username.clone()),
                roles: account.roles.clone(),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
