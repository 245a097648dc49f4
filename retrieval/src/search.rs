//! Azure AI Search vector retrieval.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::{SEARCH_API_VERSION, SearchConfig};
use crate::document::SELECT_FIELDS;
use crate::error::{Result, RetrievalError};
use crate::result::RetrievalResult;

/// Index field holding the document vectors.
const VECTOR_FIELD: &str = "contentVector";

/// Trait for document retrievers.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Number of documents requested when the caller has no preference.
    fn default_top_k(&self) -> usize;

    /// Find up to `top_k` documents close to `vector`.
    ///
    /// Failures are reported through [`RetrievalResult::Error`] and
    /// [`RetrievalResult::Warning`] rather than as an `Err`.
    async fn retrieve(&self, vector: &[f32], top_k: usize) -> RetrievalResult;
}

/// Retriever backed by an Azure AI Search index.
pub struct AzureSearchRetriever {
    /// Index settings.
    config: SearchConfig,

    /// HTTP client.
    client: reqwest::Client,
}

impl AzureSearchRetriever {
    /// Create a new retriever for the given index.
    pub fn new(config: SearchConfig) -> Self {
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

    /// Run the raw search call and return the decoded response body.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Value> {
        let body = SearchRequest {
            vectors: vec![VectorQuery {
                value: vector,
                fields: VECTOR_FIELD,
                k: top_k,
            }],
            select: SELECT_FIELDS,
            top: top_k,
        };

        let response = self
            .client
            .post(self.config.search_url())
            .query(&[("api-version", SEARCH_API_VERSION)])
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::ApiRequest {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Retriever for AzureSearchRetriever {
    fn default_top_k(&self) -> usize {
        self.config.top_k
    }

    async fn retrieve(&self, vector: &[f32], top_k: usize) -> RetrievalResult {
        debug!("Searching index {} for top {top_k} documents", self.config.index);

        match self.search(vector, top_k).await {
            Ok(body) => {
                let result = RetrievalResult::from_search_body(body);
                info!("Retrieved {} documents from the knowledge base", result.document_count());
                result
            }
            Err(e) => {
                error!("Error in knowledge base search: {e}");
                RetrievalResult::from_failure(e)
            }
        }
    }
}

/// Search request body.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vectors: Vec<VectorQuery<'a>>,
    select: &'a str,
    top: usize,
}

#[derive(Debug, Serialize)]
struct VectorQuery<'a> {
    value: &'a [f32],
    fields: &'a str,
    k: usize,
}
