//! Error types for the chat client.

use thiserror::Error;

/// Result type alias for completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Errors that can occur while requesting a chat completion.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The service answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    ApiRequest { status: u16, body: String },

    /// The response parsed but did not contain a reply.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
