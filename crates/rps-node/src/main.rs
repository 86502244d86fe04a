//! RPS Node
//!
//! Serves the commit-reveal game over HTTP on an in-memory ledger.

use rps_node::{create_router, NodeConfig, NodeState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NodeConfig::from_env()?;
    let app = create_router(NodeState::new());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("RPS node listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
