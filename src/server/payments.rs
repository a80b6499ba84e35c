//! HTTP handlers for the Payments API
//!
//! Maps HTTP verbs on the `/payments` collection to store operations:
//!
//! | Method & path          | Success          | Failure                 |
//! |------------------------|------------------|-------------------------|
//! | `POST /payments`       | 201 + payment    | 400 validation, 500     |
//! | `GET /payments/{id}`   | 200 + payment    | 404, 500                |
//! | `GET /payments`        | 200 + array      | 500                     |
//! | `PUT /payments/{id}`   | 200 + payment    | 400 validation, 404, 500|
//! | `DELETE /payments/{id}`| 204 empty        | 404, 500                |
//!
//! A body that fails to bind (malformed JSON) yields 400 with the parse
//! error text before validation runs; validation failures are reported
//! before any store call.

use crate::core::error::ApiError;
use crate::core::payment::Payment;
use crate::server::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

const BASE_PATH: &str = "/payments";

/// Routes for the Payments API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(list_payments).post(create_payment))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

/// Bind the request body, mapping any rejection to a 400 with the parse
/// error text.
fn bind(body: Result<Json<Payment>, JsonRejection>) -> Result<Payment, ApiError> {
    let Json(payment) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(payment)
}

/// `POST /payments`: create a payment.
async fn create_payment(
    State(state): State<AppState>,
    body: Result<Json<Payment>, JsonRejection>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = bind(body)?;
    payment.validate()?;
    let created = state.store.create(payment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /payments/{id}`: get a payment by id.
async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment = state.store.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(payment))
}

/// `GET /payments`: list all live payments.
async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = state.store.list().await?;
    Ok(Json(payments))
}

/// `PUT /payments/{id}`: update a payment by id.
async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Payment>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let payment = bind(body)?;
    payment.validate()?;
    let updated = state
        .store
        .update(&id, payment)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

/// `DELETE /payments/{id}`: soft-delete a payment by id.
async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
