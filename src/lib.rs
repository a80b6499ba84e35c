//! # Payments API
//!
//! A small HTTP service exposing CRUD operations over a single `Payment`
//! resource, backed by MongoDB.
//!
//! ## Architecture
//!
//! - **Payment model** ([`core::payment`]): the entity definition and its
//!   ordered, first-failure field validation.
//! - **Payments store** ([`storage`]): the `PaymentStore` capability trait
//!   with a MongoDB production backend and an in-memory backend for tests.
//!   All records are soft-deleted: deletion sets a `deleted_at` timestamp
//!   and every read path excludes deleted records.
//! - **Server** ([`server`]): axum handlers translating store results and
//!   validation failures into HTTP responses, plus request logging and
//!   request-ID middleware.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use payments_api::prelude::*;
//!
//! let store = Arc::new(InMemoryPaymentStore::new());
//! let app = build_router(store);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::error::{ApiError, StoreError, ValidationError};
    pub use crate::core::payment::{Entity, Payment};
    pub use crate::server::build_router;
    pub use crate::storage::{InMemoryPaymentStore, MongoPaymentStore, PaymentStore};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
