//! # Retrieval
//!
//! Looks up documents related to a query embedding in an Azure AI Search
//! index and normalizes the hits into [`RetrievedDocument`]s.
//!
//! Retrieval never fails a chat turn. Transport problems and unexpected
//! response shapes are folded into [`RetrievalResult::Error`] and
//! [`RetrievalResult::Warning`], and every outcome renders to a JSON string
//! that is handed to the model as context.
//!
//! ```text
//! Embedding ──► Retriever::retrieve ──► RetrievalResult ──► context string
//!                     │                   ├─ Documents([...])
//!                     ▼                   ├─ Error { error }
//!        POST {search}/indexes/{index}    └─ Warning { warning }
//!             /docs/search
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod result;
pub mod search;

pub use config::{DEFAULT_TOP_K, SEARCH_API_VERSION, SearchConfig};
pub use document::RetrievedDocument;
pub use error::{Result, RetrievalError};
pub use result::RetrievalResult;
pub use search::{AzureSearchRetriever, Retriever};
