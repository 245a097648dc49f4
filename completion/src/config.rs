//! Connection settings for the chat deployment.

/// Where and how to reach the Azure OpenAI chat deployment.
#[derive(Clone)]
pub struct ChatConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,

    /// Value sent in the `api-key` header.
    pub api_key: String,

    /// Value of the `api-version` query parameter.
    pub api_version: String,

    /// Name of the chat deployment.
    pub deployment: String,
}

impl ChatConfig {
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

    /// Full URL of the chat completions operation, without the query string.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint.trim_end_matches('/'),
            self.deployment
        )
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_completions_url() {
        let config = ChatConfig::new("https://example.openai.azure.com", "k", "v", "gpt-4o");
        assert_eq!(
            config.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions"
        );
    }
}
