//! Process configuration, read once at startup.

use clap::Parser;
use ragchat_completion::ChatConfig;
use ragchat_embeddings::EmbeddingConfig;
use ragchat_retrieval::{DEFAULT_TOP_K, SearchConfig};

/// Settings for the chat endpoint and the three services behind it.
///
/// Every option can be given as a flag or through the environment variable
/// named next to it.
#[derive(Parser, Clone)]
#[command(
    name = "ragchat-app-server",
    about = "HTTP endpoint that answers chat turns with knowledge base context"
)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "RAGCHAT_BIND", default_value = "127.0.0.1:7071")]
    pub bind: String,

    /// Azure OpenAI resource endpoint.
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
    pub openai_endpoint: String,

    /// Azure OpenAI API key.
    #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Azure OpenAI API version used for both deployments.
    #[arg(long, env = "AZURE_OPENAI_API_VERSION")]
    pub openai_api_version: String,

    /// Deployment that produces query embeddings.
    #[arg(long, env = "AZURE_OPENAI_EMBEDDINGS_DEPLOYMENT")]
    pub embeddings_deployment: String,

    /// Deployment that produces chat replies.
    #[arg(long, env = "AZURE_OPENAI_CHAT_DEPLOYMENT")]
    pub chat_deployment: String,

    /// Azure AI Search service endpoint.
    #[arg(long, env = "AZURE_SEARCH_ENDPOINT")]
    pub search_endpoint: String,

    /// Azure AI Search API key.
    #[arg(long, env = "AZURE_SEARCH_API_KEY", hide_env_values = true)]
    pub search_api_key: String,

    /// Index holding the knowledge base documents.
    #[arg(long, env = "AZURE_SEARCH_INDEX")]
    pub search_index: String,

    /// Number of documents injected as context.
    #[arg(long, env = "RAGCHAT_SEARCH_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub search_top_k: usize,
}

impl ServerConfig {
    /// Settings for the embeddings deployment.
    pub fn embedding(&self) -> EmbeddingConfig {
        EmbeddingConfig::new(
            &self.openai_endpoint,
            &self.openai_api_key,
            &self.openai_api_version,
            &self.embeddings_deployment,
        )
    }

    /// Settings for the search index.
    pub fn search(&self) -> SearchConfig {
        SearchConfig::new(&self.search_endpoint, &self.search_api_key, &self.search_index)
            .with_top_k(self.search_top_k.max(1))
    }

    /// Settings for the chat deployment.
    pub fn chat(&self) -> ChatConfig {
        ChatConfig::new(
            &self.openai_endpoint,
            &self.openai_api_key,
            &self.openai_api_version,
            &self.chat_deployment,
        )
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("embedding", &self.embedding())
            .field("search", &self.search())
            .field("chat", &self.chat())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(extra: &[&str]) -> ServerConfig {
        let mut args = vec![
            "ragchat-app-server",
            "--openai-endpoint",
            "https://aoai.example.com/",
            "--openai-api-key",
            "aoai-secret",
            "--openai-api-version",
            "2024-02-01",
            "--embeddings-deployment",
            "embed",
            "--chat-deployment",
            "chat",
            "--search-endpoint",
            "https://search.example.net",
            "--search-api-key",
            "search-secret",
            "--search-index",
            "kb",
        ];
        args.extend_from_slice(extra);
        ServerConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_component_configs_share_openai_settings() {
        let config = parse(&[]);

        assert_eq!(
            config.embedding().embeddings_url(),
            "https://aoai.example.com/openai/deployments/embed/embeddings"
        );
        assert_eq!(
            config.chat().completions_url(),
            "https://aoai.example.com/openai/deployments/chat/chat/completions"
        );
        assert_eq!(config.chat().api_version, "2024-02-01");
        assert_eq!(
            config.search().search_url(),
            "https://search.example.net/indexes/kb/docs/search"
        );
    }

    #[test]
    fn test_top_k_defaults_to_five() {
        assert_eq!(parse(&[]).search().top_k, 5);
        assert_eq!(parse(&["--search-top-k", "3"]).search().top_k, 3);
        assert_eq!(parse(&["--search-top-k", "0"]).search().top_k, 1);
    }

    #[test]
    fn test_debug_output_hides_keys() {
        let rendered = format!("{:?}", parse(&[]));
        assert!(!rendered.contains("aoai-secret"));
        assert!(!rendered.contains("search-secret"));
    }
}
