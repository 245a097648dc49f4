//! Configuration for the search client.

/// API version of the vector search operation.
pub const SEARCH_API_VERSION: &str = "2023-07-01-Preview";

/// Number of hits requested when nothing else is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// Where and how to reach the search index.
#[derive(Clone)]
pub struct SearchConfig {
    /// Search service endpoint, e.g. `https://my-search.search.windows.net`.
    pub endpoint: String,

    /// Value sent in the `api-key` header.
    pub api_key: String,

    /// Name of the index holding the document vectors.
    pub index: String,

    /// Maximum number of documents to retrieve.
    pub top_k: usize,
}

impl SearchConfig {
    /// Create a new configuration with the default `top_k`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            index: index.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of documents to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Full URL of the search operation, without the query string.
    pub fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search",
            self.endpoint.trim_end_matches('/'),
            self.index
        )
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("index", &self.index)
            .field("top_k", &self.top_k)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_to_five_hits() {
        let config = SearchConfig::new("https://search", "key", "docs");
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.with_top_k(3).top_k, 3);
    }

    #[test]
    fn test_search_url() {
        let config = SearchConfig::new("https://search.example.net/", "key", "kb-index");
        assert_eq!(
            config.search_url(),
            "https://search.example.net/indexes/kb-index/docs/search"
        );
    }
}
