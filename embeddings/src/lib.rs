//! # Embeddings
//!
//! Turns the latest user message of a conversation into a dense vector by
//! calling an Azure OpenAI embeddings deployment.
//!
//! ```text
//! text ──► EmbeddingProvider::embed ──► Embedding
//!                    │
//!                    ▼
//!   POST {endpoint}/openai/deployments/{deployment}/embeddings
//! ```

pub mod config;
pub mod error;
pub mod provider;

pub use config::EmbeddingConfig;
pub use error::{EmbeddingError, Result};
pub use provider::{AzureOpenAIProvider, EmbeddingProvider};

/// A dense vector embedding.
///
/// The dimension is fixed by the embeddings deployment and treated as opaque.
pub type Embedding = Vec<f32>;
