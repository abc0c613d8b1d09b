//! OpenAI-compatible implementation of the `Ai` trait.
//!
//! Wraps `llm_client::LlmClient`, so it works against any provider
//! exposing the `/chat/completions` and `/embeddings` routes.

use async_trait::async_trait;
use llm_client::{LlmClient, LlmError};

use crate::error::{EmbedError, NormalizeError};
use crate::traits::Ai;

const ORGANIZE_SYSTEM_PROMPT: &str = "You are a content organizer. You will receive the raw \
text of a web page. Rewrite it as a structured, concise document that preserves all factual \
information. The first line must be a clear, descriptive title for the page. Do not invent \
facts that are not in the text.";

/// AI service backed by an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiService {
    client: LlmClient,
    output_language: Option<String>,
}

impl OpenAiService {
    /// Wrap a configured client.
    pub fn new(client: LlmClient) -> Self {
        Self {
            client,
            output_language: None,
        }
    }

    /// Ask the model to write organized documents in a specific language.
    pub fn with_output_language(mut self, language: impl Into<String>) -> Self {
        self.output_language = Some(language.into());
        self
    }

    fn system_prompt(&self) -> String {
        match &self.output_language {
            Some(language) => format!(
                "{} Write the document in {}.",
                ORGANIZE_SYSTEM_PROMPT, language
            ),
            None => ORGANIZE_SYSTEM_PROMPT.to_string(),
        }
    }
}

fn normalize_error(e: LlmError) -> NormalizeError {
    match e {
        LlmError::MalformedResponse(message) => NormalizeError::MalformedResponse(message),
        other => NormalizeError::Service(Box::new(other)),
    }
}

fn embed_error(e: LlmError) -> EmbedError {
    match e {
        LlmError::MalformedResponse(message) => EmbedError::MalformedResponse(message),
        other => EmbedError::Service(Box::new(other)),
    }
}

#[async_trait]
impl Ai for OpenAiService {
    async fn organize(&self, raw_text: &str, url: &str) -> Result<String, NormalizeError> {
        let user = format!("URL: {}\n\nRaw page content:\n{}", url, raw_text);
        let organized = self
            .client
            .chat(&self.system_prompt(), &user)
            .await
            .map_err(normalize_error)?;

        if organized.trim().is_empty() {
            return Err(NormalizeError::MalformedResponse(
                "empty organize response".to_string(),
            ));
        }

        Ok(organized)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let embedding = self.client.embed(text).await.map_err(embed_error)?;

        if embedding.is_empty() {
            return Err(EmbedError::MalformedResponse(
                "empty embedding vector".to_string(),
            ));
        }

        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_directive_is_appended() {
        let service = OpenAiService::new(LlmClient::new("sk-test")).with_output_language("Spanish");
        assert!(service.system_prompt().ends_with("Write the document in Spanish."));

        let plain = OpenAiService::new(LlmClient::new("sk-test"));
        assert_eq!(plain.system_prompt(), ORGANIZE_SYSTEM_PROMPT);
    }
}
