//! Connection settings for the embeddings deployment.

/// Where and how to reach the Azure OpenAI embeddings deployment.
#[derive(Clone)]
pub struct EmbeddingConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,

    /// Value sent in the `api-key` header.
    pub api_key: String,

    /// Value of the `api-version` query parameter.
    pub api_version: String,

    /// Name of the embeddings deployment.
    pub deployment: String,
}

impl EmbeddingConfig {
    /// Create a new configuration.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
            deployment: deployment.into(),
        }
    }

    /// Full URL of the embeddings operation, without the query string.
    pub fn embeddings_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings",
            self.endpoint.trim_end_matches('/'),
            self.deployment
        )
    }
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}
