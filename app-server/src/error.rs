//! Errors that end a chat turn without a reply.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ragchat_completion::CompletionError;
use ragchat_embeddings::EmbeddingError;
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;

/// Errors that abort a chat turn.
///
/// Search failures are absent on purpose: they are folded into the context
/// message and the turn continues.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The request body is not a JSON array of messages.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The request carried no messages to answer.
    #[error("conversation must contain at least one message")]
    EmptyConversation,

    /// The embeddings deployment failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The chat deployment failed.
    #[error("chat completion failed: {0}")]
    Completion(#[from] CompletionError),
}

impl HandlerError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::EmptyConversation => StatusCode::BAD_REQUEST,
            Self::Embedding(_) | Self::Completion(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Chat turn failed: {self}");
        } else {
            warn!("Rejected chat request: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
