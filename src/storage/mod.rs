//! Storage backends for payment records
//!
//! The [`PaymentStore`] trait is the capability interface consumed by the
//! HTTP handlers. Two implementations exist: [`MongoPaymentStore`] for
//! production and [`InMemoryPaymentStore`] for tests and development.
//!
//! Deletion is always a soft delete: the record's `deleted_at` timestamp is
//! set and the record becomes invisible to every read path (get, list,
//! update, delete) while physically remaining in storage.

pub mod in_memory;
pub mod mongodb;

pub use in_memory::InMemoryPaymentStore;
pub use mongodb::MongoPaymentStore;

use crate::core::error::StoreError;
use crate::core::payment::Payment;
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// Ceiling applied to every store operation so a slow backend cannot block
/// a request indefinitely.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// CRUD operations on payment records, polymorphic over the backing store.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Create the provided payment.
    ///
    /// Assigns a fresh id, sets `created_at` and `updated_at` to the current
    /// time, clears `deleted_at`, and returns the full stored record.
    async fn create(&self, payment: Payment) -> Result<Payment, StoreError>;

    /// Return the live payment with the specified id, or `None` if no live
    /// record with that id exists.
    async fn get(&self, id: &str) -> Result<Option<Payment>, StoreError>;

    /// List all live payments. Order is backend-determined.
    async fn list(&self) -> Result<Vec<Payment>, StoreError>;

    /// Update the live payment with the specified id.
    ///
    /// Replaces every field except `id` (forced to the given id, ignoring
    /// any id in the body), `created_at` (preserved from the stored record)
    /// and `deleted_at` (preserved); sets `updated_at` to the current time.
    /// Returns `None` if no live record matches.
    async fn update(&self, id: &str, payment: Payment) -> Result<Option<Payment>, StoreError>;

    /// Soft-delete the live payment with the specified id.
    ///
    /// Returns `true` if a record was marked deleted, `false` if no live
    /// record matched (including an already-deleted one).
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Whether the backing store can currently be reached.
    ///
    /// Never errors; any probe failure within [`OPERATION_TIMEOUT`] reports
    /// `false`.
    async fn is_online(&self) -> bool;
}

/// Parse a payment id, surfacing malformed syntax as [`StoreError::InvalidId`].
pub(crate) fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
