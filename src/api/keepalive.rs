// Keep-alive HTTP endpoint for hosting platforms that ping the process

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::features::status::{BotStatus, StatusSnapshot};

pub fn router(status: Arc<BotStatus>) -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/status", get(status_report))
        .with_state(status)
}

async fn alive() -> &'static str {
    "Bot is alive"
}

async fn status_report(State(status): State<Arc<BotStatus>>) -> Json<StatusSnapshot> {
    Json(status.snapshot())
}

/// Serve until the process exits. Bind and serve errors are logged, never fatal.
pub async fn serve(port: u16, status: Arc<BotStatus>) {
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Keep-alive server could not bind port {}: {:?}", port, e);
            return;
        }
    };

    info!("Keep-alive server listening on port {}", port);

    if let Err(e) = axum::serve(listener, router(status)).await {
        error!("Keep-alive server stopped: {:?}", e);
    }
}
