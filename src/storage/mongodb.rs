//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Payments live in a single `payments` collection. Documents are converted
//! through a `serde_json::Value` intermediate so that UUIDs and timestamps
//! are stored consistently as strings, with the domain `id` field mapped to
//! MongoDB's `_id` convention.
//!
//! # Soft-delete filtering
//!
//! Every read-path query must exclude soft-deleted records. The predicate
//! lives in exactly one place, the [`live`] / [`live_by_id`] helpers, so a
//! new read path cannot forget it. `{"deleted_at": {"$eq": null}}` matches
//! both an explicit null and an absent field, so live documents never need
//! to carry the field at all.

use crate::core::error::StoreError;
use crate::core::payment::Payment;
use crate::storage::{OPERATION_TIMEOUT, PaymentStore, parse_id};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use std::future::IntoFuture;
use uuid::Uuid;

const COLLECTION_NAME: &str = "payments";

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Filter selecting live (not soft-deleted) documents.
fn live() -> Document {
    doc! { "deleted_at": { "$eq": Bson::Null } }
}

/// Filter selecting the live document with the given id.
fn live_by_id(id: &Uuid) -> Document {
    doc! { "_id": id.to_string(), "deleted_at": { "$eq": Bson::Null } }
}

/// Update marking a document as deleted at the given instant.
fn mark_deleted(now: chrono::DateTime<Utc>) -> Document {
    doc! { "$set": { "deleted_at": now.to_rfc3339() } }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a payment into a BSON document, renaming `id` → `_id`.
fn payment_to_document(payment: &Payment) -> Result<Document, StoreError> {
    let json = serde_json::to_value(payment)
        .map_err(|e| StoreError::backend("encode payment", e))?;
    let bson_val =
        mongodb::bson::to_bson(&json).map_err(|e| StoreError::backend("encode payment", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(StoreError::backend(
                "encode payment",
                "expected a BSON document",
            ));
        }
    };

    // MongoDB convention: rename id → _id
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into a payment, renaming `_id` → `id`.
fn document_to_payment(mut doc: Document) -> Result<Payment, StoreError> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    let json = Bson::Document(doc).into_relaxed_extjson();
    serde_json::from_value(json).map_err(|e| StoreError::backend("decode payment", e))
}

/// Run a store operation under the fixed per-operation timeout.
async fn run_with_timeout<F, T>(operation: &'static str, fut: F) -> Result<T, StoreError>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(OPERATION_TIMEOUT, fut.into_future()).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(StoreError::backend(operation, e)),
        Err(_) => Err(StoreError::backend(operation, "operation timed out")),
    }
}

// ---------------------------------------------------------------------------
// MongoPaymentStore
// ---------------------------------------------------------------------------

/// Payment storage backed by MongoDB.
#[derive(Clone, Debug)]
pub struct MongoPaymentStore {
    database: Database,
}

impl MongoPaymentStore {
    /// Connect to MongoDB at the given URL and use the named database.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation (or through [`PaymentStore::is_online`]) rather than
    /// here.
    pub async fn connect(mongodb_url: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(mongodb_url)
            .await
            .map_err(|e| StoreError::backend("connect to mongodb", e))?;
        Ok(Self {
            database: client.database(database_name),
        })
    }

    /// Build a store around an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(COLLECTION_NAME)
    }
}

#[async_trait]
impl PaymentStore for MongoPaymentStore {
    async fn create(&self, mut payment: Payment) -> Result<Payment, StoreError> {
        let now = Utc::now();
        payment.id = Some(Uuid::new_v4());
        payment.created_at = now;
        payment.updated_at = now;
        payment.deleted_at = None;

        let doc = payment_to_document(&payment)?;
        run_with_timeout("create payment", self.collection().insert_one(doc)).await?;

        Ok(payment)
    }

    async fn get(&self, id: &str) -> Result<Option<Payment>, StoreError> {
        let key = parse_id(id)?;
        let doc =
            run_with_timeout("get payment", self.collection().find_one(live_by_id(&key))).await?;
        doc.map(document_to_payment).transpose()
    }

    async fn list(&self) -> Result<Vec<Payment>, StoreError> {
        let cursor = run_with_timeout("list payments", self.collection().find(live())).await?;
        let docs: Vec<Document> = run_with_timeout("list payments", cursor.try_collect()).await?;
        docs.into_iter().map(document_to_payment).collect()
    }

    async fn update(&self, id: &str, mut payment: Payment) -> Result<Option<Payment>, StoreError> {
        let key = parse_id(id)?;
        // Force-overwrite the payment's id so it cannot be changed by the
        // body, and stamp the modification date.
        payment.id = Some(key);
        payment.updated_at = Utc::now();

        // Update via $set of the mutable fields only: `_id` stays fixed and
        // `created_at`/`deleted_at` are preserved by omission.
        let mut fields = payment_to_document(&payment)?;
        fields.remove("_id");
        fields.remove("created_at");

        let doc = run_with_timeout(
            "update payment",
            self.collection()
                .find_one_and_update(live_by_id(&key), doc! { "$set": fields })
                .return_document(ReturnDocument::After),
        )
        .await?;

        doc.map(document_to_payment).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let key = parse_id(id)?;
        let result = run_with_timeout(
            "delete payment",
            self.collection()
                .update_one(live_by_id(&key), mark_deleted(Utc::now())),
        )
        .await?;
        Ok(result.modified_count != 0)
    }

    async fn is_online(&self) -> bool {
        run_with_timeout("ping database", self.database.run_command(doc! { "ping": 1 }))
            .await
            .is_ok()
    }
}
