//! Admin HTTP surface.
//!
//! - `GET /`, `GET /health` - liveness
//! - `GET /bot/status` - whether the update listener is running
//! - `POST /bot/test-welcome` - queue an announcement for a chat
//! - `GET /bot/images` - images currently available
//!
//! `/bot/*` routes require a bearer token when `ADMIN_API_TOKEN` is set.

mod error;
mod handlers;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tracing::info;

use crate::announce::{AnnounceQueue, Announcer};
use crate::bot::ListenerStatus;

/// State shared by admin API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub announcer: Arc<Announcer>,
    pub queue: AnnounceQueue,
    pub status: ListenerStatus,
    pub api_token: Option<Arc<str>>,
}

pub fn router(state: ApiState) -> Router {
    let bot_routes = Router::new()
        .route("/bot/status", get(handlers::bot_status))
        .route("/bot/test-welcome", post(handlers::test_welcome))
        .route("/bot/images", get(handlers::images))
        .route_layer(middleware::from_fn_with_state(state.clone(), handlers::require_token));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(bot_routes)
        .with_state(state)
}

/// Serve the admin API until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: ApiState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Admin API stopped");
    Ok(())
}
