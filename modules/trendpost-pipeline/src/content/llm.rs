use std::sync::Arc;

use ai_client::{Agent, AiError, OpenAi, PromptBuilder};
use async_trait::async_trait;
use trendpost_common::{AppConfig, KeywordSet, Product, ProviderError};

use crate::traits::{ContentProvider, NoopContentProvider};

const SYSTEM_PROMPT: &str =
    "You are a professional content writer specializing in SEO-friendly product reviews.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// The user prompt asking for a short post that works the keywords in.
pub fn blog_prompt(product: &Product, keywords: &KeywordSet) -> String {
    format!(
        "Write a concise, engaging 150-200 word blog post about the product \"{name}\" \
         which is in the {category} category and priced at {price}. \
         The post should have an attention-grabbing introduction, \
         highlight key features and benefits, include a call to action, \
         and naturally incorporate these keywords: {keywords}. \
         Format the response as a complete blog post with paragraphs.",
        name = product.name,
        category = product.category_words(),
        price = product.price,
        keywords = keywords.joined(),
    )
}

fn classify(provider: &str, err: AiError) -> ProviderError {
    match err {
        AiError::Parse(message) | AiError::EmptyCompletion(message) => {
            ProviderError::malformed(provider, message)
        }
        other => ProviderError::request_failed(provider, other),
    }
}

/// Blog body from an OpenAI-compatible chat model.
pub struct LlmContentProvider {
    agent: OpenAi,
}

impl LlmContentProvider {
    pub const NAME: &'static str = "openai";

    pub fn new(agent: OpenAi) -> Self {
        Self { agent }
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let key = config.openai_api_key.as_deref()?;
        let mut agent = OpenAi::new(key, &config.openai_model).with_timeout(config.http_timeout);
        if let Some(url) = config.openai_base_url.as_deref() {
            agent = agent.with_base_url(url);
        }
        Some(Self::new(agent))
    }
}

#[async_trait]
impl ContentProvider for LlmContentProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn generate(&self, product: &Product, keywords: &KeywordSet) -> Result<String, ProviderError> {
        let content = self
            .agent
            .prompt(blog_prompt(product, keywords))
            .preamble(SYSTEM_PROMPT)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .send()
            .await
            .map_err(|e| classify(Self::NAME, e))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(ProviderError::malformed(Self::NAME, "completion was blank"));
        }
        Ok(content.to_string())
    }
}

/// The LLM provider when a key is configured, otherwise a provider that
/// always reports itself unavailable.
pub fn build_content_provider(config: &AppConfig) -> Arc<dyn ContentProvider> {
    match LlmContentProvider::from_config(config) {
        Some(provider) => Arc::new(provider),
        None => Arc::new(NoopContentProvider),
    }
}
