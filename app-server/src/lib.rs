//! # App Server
//!
//! HTTP front end for a retrieval-augmented chat turn: embed the latest
//! message, look up related documents, inject them as a system message and
//! let the model answer.

pub mod chat_handler;
pub mod config;
pub mod error;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

pub use chat_handler::{CONTEXT_PREFIX, ChatHandler, ResponsePayload};
pub use config::ServerConfig;
pub use error::HandlerError;
pub use router::router;

/// Serve chat turns until Ctrl-C.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind))?;
    info!("Starting with {config:?}");

    let handler = Arc::new(ChatHandler::from_config(&config));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("ragchat listening on http://{addr}");

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
