// Server-rendered listing and detail pages

pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;

/// Binds `host:port` and serves the app until Ctrl-C
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = app_router(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "Web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
