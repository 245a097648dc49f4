//! # Completion
//!
//! Conversation types and the client that sends a conversation to an Azure
//! OpenAI chat deployment.
//!
//! ```text
//! [Message] ──► ChatProvider::complete ──► AssistantReply
//!                       │
//!                       ▼
//!   POST {endpoint}/openai/deployments/{deployment}/chat/completions
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod provider;

pub use config::ChatConfig;
pub use error::{CompletionError, Result};
pub use message::{AssistantReply, Message};
pub use provider::{AzureChatProvider, ChatProvider};
