//! Outcome of a retrieval attempt.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::document::RetrievedDocument;

const ERROR_PREFIX: &str = "Failed to retrieve information from the knowledge base";
const NOT_FOUND_WARNING: &str = "No relevant information found in the knowledge base";

/// What the retriever hands back to the chat turn.
///
/// All three variants are successful values: a failed search still produces
/// context for the model, it just describes the failure instead of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalResult {
    /// Hits in the order ranked by the search service.
    Documents(Vec<RetrievedDocument>),

    /// The search call failed; serializes as `{"error": "..."}`.
    Error(String),

    /// The search call succeeded without a `value` list; serializes as
    /// `{"warning": "..."}`.
    Warning(String),
}

impl RetrievalResult {
    /// Build the `Error` variant for a failed search call.
    pub fn from_failure(err: impl std::fmt::Display) -> Self {
        Self::Error(format!("{ERROR_PREFIX}: {err}"))
    }

    /// Build the `Warning` variant for a response without hits.
    pub fn not_found() -> Self {
        Self::Warning(NOT_FOUND_WARNING.to_string())
    }

    /// Interpret a successful search response body.
    pub fn from_search_body(body: Value) -> Self {
        let Some(value) = body.get("value") else {
            warn!("Unexpected response format from knowledge base search: {body}");
            return Self::not_found();
        };

        let Some(hits) = value.as_array() else {
            warn!("Unexpected hit list from knowledge base search: {value}");
            return Self::not_found();
        };

        Self::Documents(hits.iter().map(RetrievedDocument::from_hit).collect())
    }

    /// Render the result as the JSON string injected into the conversation.
    pub fn to_context_string(&self) -> String {
        // Serializing strings and option fields into JSON cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Number of documents carried, zero for `Error` and `Warning`.
    pub fn document_count(&self) -> usize {
        match self {
            Self::Documents(documents) => documents.len(),
            Self::Error(_) | Self::Warning(_) => 0,
        }
    }
}

impl Serialize for RetrievalResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Documents(documents) => documents.serialize(serializer),
            Self::Error(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
            Self::Warning(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("warning", message)?;
                map.end()
            }
        }
    }
}
