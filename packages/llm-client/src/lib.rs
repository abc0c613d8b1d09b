//! Pure REST client for OpenAI-compatible chat and embedding endpoints.
//!
//! Carries no pipeline logic: callers decide what to do with the
//! organized text or the embedding vector. Works against any service
//! exposing the `/chat/completions` and `/embeddings` routes.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::LlmClient;
//!
//! let client = LlmClient::new("sk-...")
//!     .with_base_url("https://ai.sumopod.com/v1")
//!     .with_chat_model("gpt-4o-mini");
//!
//! let organized = client.chat("Organize this page.", raw_text).await?;
//! let embedding = client.embed(&organized).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{LlmError, Result};
pub use types::{ChatMessage, ChatRequest, ChatResponse, EmbeddingRequest, EmbeddingResponse};

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

/// Default request timeout for both endpoints.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible LLM service.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
    max_tokens: u32,
}

impl LlmClient {
    /// Create a new client with the given API key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            max_tokens: 1000,
        }
    }

    /// Set a custom base URL (for proxies and compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the embedding model (default: text-embedding-3-small).
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the completion token budget (default: 1000).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the request timeout for both endpoints.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        self
    }

    /// Get the configured chat model name.
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// Get the configured embedding model name.
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Chat completion: returns the content of the first choice.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: None,
            max_tokens: Some(self.max_tokens),
        };

        debug!(model = %self.chat_model, user_len = user.len(), "chat request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("no choices in response".to_string()))
    }

    /// Embedding: returns the first vector of the response.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: input.to_string(),
        };

        debug!(model = %self.embedding_model, input_len = input.len(), "embedding request");

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LlmError::MalformedResponse("no embedding in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides() {
        let client = LlmClient::new("sk-test")
            .with_base_url("https://proxy.example.com/v1")
            .with_chat_model("gpt-4o")
            .with_embedding_model("text-embedding-3-large")
            .with_max_tokens(2048);

        assert_eq!(client.base_url, "https://proxy.example.com/v1");
        assert_eq!(client.chat_model(), "gpt-4o");
        assert_eq!(client.embedding_model(), "text-embedding-3-large");
        assert_eq!(client.max_tokens, 2048);
    }
}
