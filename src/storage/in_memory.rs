//! In-memory implementation of PaymentStore for testing and development
//!
//! Applies the same soft-delete semantics as the MongoDB backend: deleted
//! records stay in the map with `deleted_at` set and are invisible to every
//! read path.

use crate::core::error::StoreError;
use crate::core::payment::Payment;
use crate::storage::{PaymentStore, parse_id};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory payment store, keyed by id. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<Uuid, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn create(&self, mut payment: Payment) -> Result<Payment, StoreError> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        payment.id = Some(id);
        payment.created_at = now;
        payment.updated_at = now;
        payment.deleted_at = None;

        let mut payments = self
            .payments
            .write()
            .map_err(|e| StoreError::backend("create payment", e))?;
        payments.insert(id, payment.clone());

        Ok(payment)
    }

    async fn get(&self, id: &str) -> Result<Option<Payment>, StoreError> {
        let key = parse_id(id)?;
        let payments = self
            .payments
            .read()
            .map_err(|e| StoreError::backend("get payment", e))?;

        Ok(payments.get(&key).filter(|p| p.is_live()).cloned())
    }

    async fn list(&self) -> Result<Vec<Payment>, StoreError> {
        let payments = self
            .payments
            .read()
            .map_err(|e| StoreError::backend("list payments", e))?;

        Ok(payments.values().filter(|p| p.is_live()).cloned().collect())
    }

    async fn update(&self, id: &str, mut payment: Payment) -> Result<Option<Payment>, StoreError> {
        let key = parse_id(id)?;
        let mut payments = self
            .payments
            .write()
            .map_err(|e| StoreError::backend("update payment", e))?;

        let Some(existing) = payments.get(&key).filter(|p| p.is_live()) else {
            return Ok(None);
        };

        payment.id = Some(key);
        payment.created_at = existing.created_at;
        payment.deleted_at = existing.deleted_at;
        payment.updated_at = Utc::now();

        payments.insert(key, payment.clone());
        Ok(Some(payment))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let key = parse_id(id)?;
        let mut payments = self
            .payments
            .write()
            .map_err(|e| StoreError::backend("delete payment", e))?;

        match payments.get_mut(&key).filter(|p| p.is_live()) {
            Some(payment) => {
                payment.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_online(&self) -> bool {
        true
    }
}
