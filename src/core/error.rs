//! Typed error handling for the payments service
//!
//! Three error categories map onto HTTP status codes:
//!
//! - [`ValidationError`]: the request body violates a required-field rule → 400
//! - [`StoreError`]: the backing store failed (connectivity, decode failure,
//!   malformed record id) → 500
//! - [`ApiError`]: the handler-level taxonomy, adding the 404 "payment not
//!   found" case and 400 body-binding failures, and implementing
//!   [`IntoResponse`] so handlers can simply return `Result<_, ApiError>`
//!
//! A malformed record id deliberately surfaces as a [`StoreError`] and thus
//! a 500, not a 400. This conflates "your input was syntactically wrong"
//! with "the database is unavailable" and is preserved for compatibility
//! with the existing API contract; see DESIGN.md.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// A violated required-field rule on an [`Entity`](crate::core::Entity).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EntityValidationError {
    #[error("the entity's account number must not be empty")]
    EmptyAccountNumber,
    #[error("the entity's bank id must not be empty")]
    EmptyBankId,
    #[error("the entity's name must not be empty")]
    EmptyName,
}

/// A violated required-field rule on a [`Payment`](crate::core::Payment).
///
/// The display strings are an observable contract; clients and the e2e test
/// suite match them exactly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    /// A nested entity field is empty. `role` is "beneficiary" or "debtor".
    #[error("{role}: {source}")]
    Entity {
        role: &'static str,
        source: EntityValidationError,
    },
    #[error("the amount must be positive")]
    NonPositiveAmount,
    #[error("the currency must not be empty")]
    EmptyCurrency,
    #[error("the date must not be empty")]
    MissingDate,
    #[error("the description must not be empty")]
    EmptyDescription,
}

/// A failure at the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The supplied id is not a syntactically valid payment id.
    #[error("\"{0}\" is not a valid payment id")]
    InvalidId(String),

    /// The backing store failed to execute an operation.
    #[error("failed to {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Wrap a backend failure with the operation being attempted,
    /// e.g. `StoreError::backend("create payment", err)`.
    pub fn backend(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Backend {
            operation,
            message: err.to_string(),
        }
    }
}

/// Handler-level error taxonomy for the payments API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body violates a validation rule → 400.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request body could not be bound (malformed JSON) → 400.
    #[error("{0}")]
    BadRequest(String),

    /// The operation targets a live record that does not exist → 404.
    #[error("payment not found")]
    NotFound,

    /// The store failed, including malformed-id syntax → 500.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// The HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body: `{"message": "<text>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
