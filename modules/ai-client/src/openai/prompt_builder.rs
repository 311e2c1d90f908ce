use async_trait::async_trait;
use tracing::debug;

use crate::error::{AiError, Result};
use crate::traits::PromptBuilder;

use super::types::*;
use super::OpenAi;

/// One pending chat completion: optional system preamble plus a user message.
pub struct OpenAiPromptBuilder {
    agent: OpenAi,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiPromptBuilder {
    pub(crate) fn new(agent: OpenAi, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub(crate) fn build_request(&self) -> ChatRequest {
        let model = &self.agent.model;
        let mut request = ChatRequest::new(model);

        if let Some(ref preamble) = self.preamble {
            request = request.message(WireMessage::system(preamble));
        }
        if !self.input.is_empty() {
            request = request.message(WireMessage::user(&self.input));
        }

        match self.temperature {
            Some(temp) if supports_temperature(model) => request = request.temperature(temp),
            _ => {}
        }
        if let Some(limit) = self.max_tokens {
            request = request.token_limit(limit);
        }

        request
    }
}

#[async_trait]
impl PromptBuilder for OpenAiPromptBuilder {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        let client = self.agent.client()?;

        let response = client.chat(&request).await?;
        let content = response
            .first_content()
            .ok_or_else(|| AiError::EmptyCompletion("no message content in first choice".into()))?;

        debug!(model = %request.model, chars = content.len(), "OpenAI completion received");
        Ok(content)
    }
}
