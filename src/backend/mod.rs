pub mod extract;
pub mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::info;

use crate::database::db::Backend;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(db: Arc<dyn Backend>) -> Self {
        Self { db }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes())
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, db: Arc<dyn Backend>) -> anyhow::Result<()> {
    let backend = db.backend_tag();
    let app = build_router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
