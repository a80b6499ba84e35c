//! Process configuration sourced from command-line flags and environment

use clap::Parser;

/// Configuration for the payments API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "payments-api", version, about = "HTTP API for managing payment records")]
pub struct Config {
    /// The "host:port" combination at which to serve the API.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: String,

    /// The URL at which MongoDB can be reached.
    #[arg(long, env = "MONGODB_URL", default_value = "mongodb://localhost:27017")]
    pub mongodb_url: String,

    /// The name of the MongoDB database to use for storage.
    #[arg(long, env = "MONGODB_DATABASE", default_value = "payments")]
    pub mongodb_database: String,
}
