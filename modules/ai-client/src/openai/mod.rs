mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::OpenAiPromptBuilder;

use std::time::Duration;

use crate::error::Result;
use crate::traits::Agent;

use client::OpenAiClient;

/// An OpenAI-compatible chat model. Cheap to clone; each prompt builds its
/// own HTTP client with the configured timeout.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: None,
        }
    }

    /// Point at a compatible server instead of api.openai.com.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> Result<OpenAiClient> {
        let client = OpenAiClient::new(&self.api_key, self.timeout)?;
        Ok(match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        })
    }
}

impl Agent for OpenAi {
    type PromptBuilder = OpenAiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> OpenAiPromptBuilder {
        OpenAiPromptBuilder::new(self.clone(), input.into())
    }
}
