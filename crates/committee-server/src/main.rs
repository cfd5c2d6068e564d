//! Committee scheduling server.
//!
//! Run with: cargo run -p committee-server
//! Configure with `COMMITTEE_CONFIG=path/to/committee.toml` and `RUST_LOG`.

use std::sync::Arc;

use committee_server::{api, ServerConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,committee=debug")),
        )
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        warn!(event = "config_default", error = %e, "using default configuration");
        ServerConfig::default()
    });
    let addr = config.socket_addr()?;

    let state = Arc::new(api::AppState::from_config(&config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(event = "server_start", address = %addr);
    axum::serve(listener, app).await?;
    Ok(())
}
