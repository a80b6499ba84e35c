//! Binary entrypoint: parse configuration, connect to MongoDB, serve.

use anyhow::{Context, Result};
use clap::Parser;
use payments_api::config::Config;
use payments_api::server;
use payments_api::storage::MongoPaymentStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let store = MongoPaymentStore::connect(&config.mongodb_url, &config.mongodb_database)
        .await
        .context("failed to initialize the database")?;

    server::serve(Arc::new(store), &config.bind_addr).await
}
