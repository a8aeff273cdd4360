//! Typed errors for card operations
//!
//! Every failure of the card core maps to exactly one [`CardError`] variant:
//!
//! - [`CardError::NotFound`]: the record is absent *or* owned by someone else.
//!   Both cases produce the same value so callers cannot discover which ids exist.
//! - [`CardError::InvalidParameter`]: a malformed page or sort request.
//! - [`CardError::Storage`]: the backing store failed. Never retried here.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.fetch_one(id, &caller).await {
//!     Ok(card) => println!("{}", card.amount),
//!     Err(CardError::NotFound { id }) => println!("no card {}", id),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use crate::core::card::CardId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Error returned by the card facade and guard
#[derive(Debug, Error)]
pub enum CardError {
    #[error("cash card {id} not found")]
    NotFound { id: CardId },

    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CardError {
    pub fn not_found(id: CardId) -> Self {
        CardError::NotFound { id }
    }

    pub fn invalid(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        CardError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CardError::NotFound { .. } => StatusCode::NOT_FOUND,
            CardError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            CardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CardError::NotFound { .. } => "CARD_NOT_FOUND",
            CardError::InvalidParameter { .. } => "INVALID_PARAMETER",
            CardError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to the JSON body sent to clients
    ///
    /// Storage details stay in the logs; the client only sees a generic message.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            CardError::Storage(_) => "storage backend unavailable".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
        }
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        if let CardError::Storage(e) = &self {
            tracing::error!(error = %e, "storage failure");
        }
        let status = self.status_code();
        (status, Json(self.to_response())).into_response()
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Failure inside a [`CardStore`](crate::core::store::CardStore) backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached
    #[error("{backend} connection error: {message}")]
    Connection { backend: String, message: String },

    /// A query or command failed
    #[error("{backend} {operation} failed: {message}")]
    Query {
        backend: String,
        operation: String,
        message: String,
    },

    /// A lock guarding in-process state was poisoned
    #[error("lock poisoned during {operation}")]
    LockPoisoned { operation: String },
}

impl StorageError {
    pub fn query(backend: &str, operation: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Query {
            backend: backend.to_string(),
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }

    pub fn poisoned(operation: &str) -> Self {
        StorageError::LockPoisoned {
            operation: operation.to_string(),
        }
    }
}

/// A specialized Result type for card operations
pub type CardResult<T> = Result<T, CardError>;
