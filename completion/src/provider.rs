//! Chat completion providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ChatConfig;
use crate::error::{CompletionError, Result};
use crate::message::{AssistantReply, Message};

/// Trait for chat completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Ask the model for the next turn of `messages`.
    async fn complete(&self, messages: &[Message]) -> Result<AssistantReply>;
}

/// Azure OpenAI chat provider.
///
/// Always samples at temperature zero.
pub struct AzureChatProvider {
    /// Deployment settings.
    config: ChatConfig,

    /// HTTP client.
    client: reqwest::Client,
}

impl AzureChatProvider {
    /// Create a new provider for the given deployment.
    pub fn new(config: ChatConfig) -> Self {
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
impl ChatProvider for AzureChatProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn complete(&self, messages: &[Message]) -> Result<AssistantReply> {
        debug!(
            "Requesting completion for {} messages from deployment: {}",
            messages.len(),
            self.config.deployment
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&ChatRequest {
                messages,
                temperature: 0,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ApiRequest {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let result: ChatResponse = serde_json::from_str(&body)?;

        let message = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::InvalidResponse("No choices in response".to_string()))?
            .message;

        info!("Received {} reply from chat deployment", message.role);

        Ok(AssistantReply {
            role: message.role,
            content: message.content.unwrap_or_default(),
        })
    }
}

/// Chat completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
    temperature: u8,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}
