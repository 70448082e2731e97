//! In-memory stand-in for the scoring backend, for local runs and tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use hr_core::Result;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod handlers;
pub mod scoring;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/headlines/random", get(handlers::random_headline))
        .route("/api/rewrites", post(handlers::submit_rewrite))
        .route("/api/rewrites/:id", delete(handlers::delete_rewrite))
        .route("/api/users/:user_id/rewrites", get(handlers::user_rewrites))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Stub backend listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

/// Serve on an ephemeral local port in the background.
pub async fn spawn(state: AppState) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    let app = create_app(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Stub backend stopped: {}", e);
        }
    });
    Ok((addr, handle))
}
