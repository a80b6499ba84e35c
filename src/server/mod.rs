//! HTTP server wiring: router construction, middleware, status endpoint
//!
//! The store handle is injected explicitly as axum state at router-build
//! time; handlers receive it through `State` with no runtime lookup.

pub mod payments;

use crate::storage::PaymentStore;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state: the store the service persists payments in.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PaymentStore>,
}

/// Current reachability of the backing database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseStatus {
    Online,
    Offline,
}

/// Response returned by the root status handler.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// The current status of the database.
    pub database_status: DatabaseStatus,
    /// The current timestamp.
    pub time: DateTime<Utc>,
}

/// Build the application router around the given store.
///
/// Installs, ahead of every handler: request-ID assignment and propagation,
/// and structured request logging.
pub fn build_router(store: Arc<dyn PaymentStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(status))
        .merge(payments::routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// Serve the application at the given address with graceful shutdown.
pub async fn serve(store: Arc<dyn PaymentStore>, addr: &str) -> anyhow::Result<()> {
    let app = build_router(store);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("api server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Root handler reporting database reachability.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let database_status = if state.store.is_online().await {
        DatabaseStatus::Online
    } else {
        DatabaseStatus::Offline
    };

    Json(StatusResponse {
        database_status,
        time: Utc::now(),
    })
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_status_serializes_as_contract_strings() {
        assert_eq!(
            serde_json::to_value(DatabaseStatus::Online).unwrap(),
            serde_json::json!("ONLINE")
        );
        assert_eq!(
            serde_json::to_value(DatabaseStatus::Offline).unwrap(),
            serde_json::json!("OFFLINE")
        );
    }
}
