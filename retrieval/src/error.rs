//! Error types for the search client.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while talking to the search service.
///
/// These never escape [`crate::Retriever::retrieve`]; they are rendered into
/// [`crate::RetrievalResult::Error`] instead.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The service answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    ApiRequest { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
