//! The `Payment` resource and its field validation
//!
//! Validation checks run in a fixed order and report the first failing rule
//! only; the exact message strings are part of the public API contract and
//! are asserted by the end-to-end test suite.

use crate::core::error::{EntityValidationError, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A party involved in a payment.
///
/// Every field is required to be non-empty; missing fields bind to the empty
/// string so that they are rejected by [`Payment::validate`] with the
/// contractual message rather than by a deserialization error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The account number for the entity.
    #[serde(default)]
    pub account_number: String,
    /// The bank ID for the entity.
    #[serde(default)]
    pub bank_id: String,
    /// The name of the entity.
    #[serde(default)]
    pub name: String,
}

impl Entity {
    fn validate(&self) -> Result<(), EntityValidationError> {
        if self.account_number.is_empty() {
            return Err(EntityValidationError::EmptyAccountNumber);
        }
        if self.bank_id.is_empty() {
            return Err(EntityValidationError::EmptyBankId);
        }
        if self.name.is_empty() {
            return Err(EntityValidationError::EmptyName);
        }
        Ok(())
    }
}

/// A payment made to one entity (the beneficiary) by another (the debtor).
///
/// `id`, `created_at` and `updated_at` are assigned by the store; any values
/// supplied by a client are overwritten. `deleted_at` is managed solely by
/// the store and is never serialized in responses nor accepted from request
/// bodies: a record with `deleted_at` set is logically absent from every
/// read path while physically remaining in storage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payment {
    /// The ID of the payment, assigned by the store on creation.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// The record's creation date, set once by the store.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// The record's modification date, set by the store on every write.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// The record's deletion date; unset means the record is live.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,

    /// The entity that receives the payment.
    #[serde(default)]
    pub beneficiary: Entity,
    /// The entity that sends the payment.
    #[serde(default)]
    pub debtor: Entity,

    /// The amount involved in the payment. Must be strictly positive.
    #[serde(default)]
    pub amount: f64,
    /// The currency in which the payment is made. Must be non-empty.
    #[serde(default)]
    pub currency: String,
    /// The date at which the payment was processed. Must be present.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// The description associated with the payment. Must be non-empty.
    #[serde(default)]
    pub description: String,
}

impl Payment {
    /// Whether the record is live, i.e. not soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Validate the payment's required fields.
    ///
    /// Checks run in a fixed order and stop at the first violated rule:
    /// beneficiary fields, debtor fields, amount, currency, date,
    /// description. Runs identically for create and update.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.beneficiary
            .validate()
            .map_err(|source| ValidationError::Entity {
                role: "beneficiary",
                source,
            })?;
        self.debtor
            .validate()
            .map_err(|source| ValidationError::Entity {
                role: "debtor",
                source,
            })?;
        // `!(x > 0.0)` also rejects NaN.
        if !(self.amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.currency.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }
        if self.date.is_none() {
            return Err(ValidationError::MissingDate);
        }
        if self.description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }
}


#[cfg(test)]
impl Default for Payment {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            beneficiary: Entity::default(),
            debtor: Entity::default(),
            amount: 0.0,
            currency: String::new(),
            date: None,
            description: String::new(),
        }
    }
}
