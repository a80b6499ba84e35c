//! Domain model and error types for the payments service

pub mod error;
pub mod payment;

pub use error::{ApiError, StoreError, ValidationError};
pub use payment::{Entity, Payment};
