//! HTTP routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::chat_handler::{ChatHandler, ResponsePayload};
use crate::error::Result;

/// Build the router serving chat turns and health checks.
pub fn router(handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/message", post(message))
        .with_state(handler)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// The body is taken as raw bytes so that decoding errors go through
/// `HandlerError` like every other failure.
async fn message(
    State(handler): State<Arc<ChatHandler>>,
    body: Bytes,
) -> Result<Json<ResponsePayload>> {
    info!("Chat request received ({} bytes)", body.len());
    let messages = ChatHandler::parse_conversation(&body)?;
    let payload = handler.handle(messages).await?;
    Ok(Json(payload))
}
