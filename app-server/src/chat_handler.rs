//! Chat turn handler for the app-server.
//!
//! Runs the embed, retrieve, complete sequence for one conversation and
//! shapes the response payload.

use std::sync::Arc;

use ragchat_completion::{AzureChatProvider, ChatProvider, Message};
use ragchat_embeddings::{AzureOpenAIProvider, EmbeddingProvider};
use ragchat_retrieval::{AzureSearchRetriever, Retriever};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::{HandlerError, Result};

/// Prefix of the system message that carries the retrieved context.
pub const CONTEXT_PREFIX: &str = "Relevant information from the knowledge base: ";

/// Body returned for a completed chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// The caller's conversation followed by the context and reply messages.
    pub messages: Vec<Message>,

    /// Reserved; always empty.
    pub products: Vec<serde_json::Value>,
}

impl ResponsePayload {
    fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            products: Vec::new(),
        }
    }
}

/// Handler for chat turns.
///
/// Holds only shared, immutable clients, so one instance serves every
/// request.
pub struct ChatHandler {
    embedder: Arc<dyn EmbeddingProvider>,
    retriever: Arc<dyn Retriever>,
    chat: Arc<dyn ChatProvider>,
}

impl ChatHandler {
    /// Create a handler from the three collaborators.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: Arc<dyn Retriever>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            embedder,
            retriever,
            chat,
        }
    }

    /// Create a handler talking to the Azure services named in `config`.
    ///
    /// The three clients share one connection pool.
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = reqwest::Client::new();
        Self::new(
            Arc::new(AzureOpenAIProvider::new(config.embedding()).with_client(client.clone())),
            Arc::new(AzureSearchRetriever::new(config.search()).with_client(client.clone())),
            Arc::new(AzureChatProvider::new(config.chat()).with_client(client)),
        )
    }

    /// Decode a request body into a conversation.
    pub fn parse_conversation(body: &[u8]) -> Result<Vec<Message>> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Answer the last message of `messages`.
    ///
    /// The conversation only grows: a system message with the retrieved
    /// context is appended, then the model's reply.
    pub async fn handle(&self, mut messages: Vec<Message>) -> Result<ResponsePayload> {
        let Some(last) = messages.last() else {
            return Err(HandlerError::EmptyConversation);
        };
        debug!("Answering conversation of {} messages", messages.len());

        let vector = self.embedder.embed(&last.content).await?;

        let top_k = self.retriever.default_top_k();
        let relevant_info = self
            .retriever
            .retrieve(&vector, top_k)
            .await
            .to_context_string();
        messages.push(Message::system(format!("{CONTEXT_PREFIX}{relevant_info}")));

        let reply = self.chat.complete(&messages).await?;
        match serde_json::to_string(&reply) {
            Ok(json) => info!("{json}"),
            Err(e) => debug!("Could not render reply for logging: {e}"),
        }
        messages.push(reply.into());

        Ok(ResponsePayload::new(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use ragchat_completion::{AssistantReply, CompletionError};
    use ragchat_embeddings::{Embedding, EmbeddingError};
    use ragchat_retrieval::{RetrievalResult, RetrievedDocument};

    /// Records every query it is asked to embed.
    #[derive(Default)]
    struct StubEmbedder {
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        fn name(&self) -> &str {
            "stub"
        }

        async fn embed(&self, text: &str) -> ragchat_embeddings::Result<Embedding> {
            self.queries.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(EmbeddingError::InvalidResponse("no data".to_string()));
            }
            Ok(vec![0.25, 0.5])
        }
    }

    struct StubRetriever {
        result: RetrievalResult,
        calls: Mutex<Vec<(Vec<f32>, usize)>>,
    }

    impl StubRetriever {
        fn returning(result: RetrievalResult) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Retriever for StubRetriever {
        fn default_top_k(&self) -> usize {
            5
        }

        async fn retrieve(&self, vector: &[f32], top_k: usize) -> RetrievalResult {
            self.calls.lock().unwrap().push((vector.to_vec(), top_k));
            self.result.clone()
        }
    }

    /// Replies with a fixed role and remembers what it was sent.
    struct StubChat {
        role: &'static str,
        fail: bool,
        seen: Mutex<Vec<Message>>,
    }

    impl StubChat {
        fn replying_as(role: &'static str) -> Self {
            Self {
                role,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for StubChat {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, messages: &[Message]) -> ragchat_completion::Result<AssistantReply> {
            *self.seen.lock().unwrap() = messages.to_vec();
            if self.fail {
                return Err(CompletionError::InvalidResponse("no choices".to_string()));
            }
            Ok(AssistantReply {
                role: self.role.to_string(),
                content: "Here is what I found.".to_string(),
            })
        }
    }

    fn document(title: &str) -> RetrievedDocument {
        RetrievedDocument {
            title: Some(title.to_string()),
            ..RetrievedDocument::default()
        }
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::user("What is ownership?"),
            Message::new("assistant", "A set of rules."),
            Message::user("How do I borrow?"),
        ]
    }

    #[tokio::test]
    async fn test_turn_appends_context_then_reply() {
        let embedder = Arc::new(StubEmbedder::default());
        let retriever = Arc::new(StubRetriever::returning(RetrievalResult::Documents(vec![
            document("Borrowing"),
        ])));
        let chat = Arc::new(StubChat::replying_as("assistant"));
        let handler = ChatHandler::new(embedder.clone(), retriever.clone(), chat.clone());

        let payload = handler.handle(conversation()).await.unwrap();

        assert_eq!(payload.messages.len(), conversation().len() + 2);
        assert_eq!(&payload.messages[..3], conversation().as_slice());
        assert!(payload.products.is_empty());

        let context = &payload.messages[3];
        assert_eq!(context.role, "system");
        assert_eq!(
            context.content,
            "Relevant information from the knowledge base: \
             [{\"content\":null,\"url\":null,\"filepath\":null,\"title\":\"Borrowing\",\"meta_json_string\":null}]"
        );
        assert_eq!(
            payload.messages[4],
            Message::new("assistant", "Here is what I found.")
        );

        assert_eq!(*embedder.queries.lock().unwrap(), vec!["How do I borrow?"]);
        assert_eq!(
            *retriever.calls.lock().unwrap(),
            vec![(vec![0.25, 0.5], 5)]
        );
        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last(), Some(context));
    }

    #[tokio::test]
    async fn test_reply_role_comes_from_model() {
        let handler = ChatHandler::new(
            Arc::new(StubEmbedder::default()),
            Arc::new(StubRetriever::returning(RetrievalResult::Documents(Vec::new()))),
            Arc::new(StubChat::replying_as("moderator")),
        );

        let payload = handler.handle(vec![Message::user("hi")]).await.unwrap();

        assert_eq!(
            payload.messages.last().map(|m| m.role.as_str()),
            Some("moderator")
        );
    }

    #[tokio::test]
    async fn test_retrieval_failure_still_answers() {
        let handler = ChatHandler::new(
            Arc::new(StubEmbedder::default()),
            Arc::new(StubRetriever::returning(RetrievalResult::from_failure(
                "connection reset",
            ))),
            Arc::new(StubChat::replying_as("assistant")),
        );

        let payload = handler.handle(vec![Message::user("hi")]).await.unwrap();

        assert_eq!(payload.messages.len(), 3);
        let injected = payload.messages[1]
            .content
            .strip_prefix(CONTEXT_PREFIX)
            .unwrap();
        let decoded: serde_json::Value = serde_json::from_str(injected).unwrap();
        assert!(decoded.get("error").is_some());
    }

    #[tokio::test]
    async fn test_empty_conversation_is_rejected_before_any_call() {
        let embedder = Arc::new(StubEmbedder::default());
        let handler = ChatHandler::new(
            embedder.clone(),
            Arc::new(StubRetriever::returning(RetrievalResult::not_found())),
            Arc::new(StubChat::replying_as("assistant")),
        );

        let err = handler.handle(Vec::new()).await.unwrap_err();

        assert!(matches!(err, HandlerError::EmptyConversation));
        assert!(embedder.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_aborts_turn() {
        let retriever = Arc::new(StubRetriever::returning(RetrievalResult::not_found()));
        let handler = ChatHandler::new(
            Arc::new(StubEmbedder {
                fail: true,
                ..StubEmbedder::default()
            }),
            retriever.clone(),
            Arc::new(StubChat::replying_as("assistant")),
        );

        let err = handler.handle(vec![Message::user("hi")]).await.unwrap_err();

        assert!(matches!(err, HandlerError::Embedding(_)));
        assert!(retriever.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_failure_aborts_turn() {
        let handler = ChatHandler::new(
            Arc::new(StubEmbedder::default()),
            Arc::new(StubRetriever::returning(RetrievalResult::not_found())),
            Arc::new(StubChat {
                fail: true,
                ..StubChat::replying_as("assistant")
            }),
        );

        let err = handler.handle(vec![Message::user("hi")]).await.unwrap_err();

        assert!(matches!(err, HandlerError::Completion(_)));
    }

    #[test]
    fn test_parse_conversation() {
        let messages =
            ChatHandler::parse_conversation(br#"[{"role":"user","content":"hello"}]"#).unwrap();
        assert_eq!(messages, vec![Message::user("hello")]);

        assert!(matches!(
            ChatHandler::parse_conversation(b"{\"role\":\"user\"}"),
            Err(HandlerError::InvalidBody(_))
        ));
    }
}
