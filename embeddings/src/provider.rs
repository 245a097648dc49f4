//! Embedding providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use crate::Embedding;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Azure OpenAI embedding provider.
pub struct AzureOpenAIProvider {
    /// Deployment settings.
    config: EmbeddingConfig,

    /// HTTP client.
    client: reqwest::Client,
}

impl AzureOpenAIProvider {
    /// Create a new provider for the given deployment.
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for AzureOpenAIProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        debug!(
            "Generating embedding with deployment: {}",
            self.config.deployment
        );

        let response = self
            .client
            .post(self.config.embeddings_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&AzureEmbeddingRequest { input: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let result: AzureEmbeddingResponse = serde_json::from_str(&body)?;

        let embedding = result
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("No embedding in response".to_string()))?
            .embedding;

        let tokens_used = result.usage.map(|u| u.total_tokens);
        info!(
            "Generated embedding with {} dimensions (tokens: {tokens_used:?})",
            embedding.len()
        );

        Ok(embedding)
    }
}

/// Azure OpenAI request body.
#[derive(Debug, Serialize)]
struct AzureEmbeddingRequest<'a> {
    input: &'a str,
}

/// Azure OpenAI response format.
#[derive(Debug, Deserialize)]
struct AzureEmbeddingResponse {
    data: Vec<AzureEmbeddingData>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    total_tokens: u64,
}
