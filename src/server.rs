//! Listener setup for the record store service.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::SERVER_ADDR;
use crate::routes::{app, AppState};

/// Binds the service address and serves requests until shutdown.
pub async fn run(state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from(SERVER_ADDR);
    let listener = TcpListener::bind(addr).await?;
    info!("server running at http://{}", addr);
    axum::serve(listener, app(state)).await
}
