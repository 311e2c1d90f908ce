//! Provider-neutral seam for single-turn chat completions.

use async_trait::async_trait;

use crate::error::Result;

/// A configured chat model that can start a prompt.
pub trait Agent: Clone + Send + Sync {
    type PromptBuilder: PromptBuilder;

    /// Begin a prompt with `input` as the user message.
    fn prompt(&self, input: impl Into<String>) -> Self::PromptBuilder;
}

/// Options for one completion, consumed by [`PromptBuilder::send`].
#[async_trait]
pub trait PromptBuilder: Send + Sized {
    /// System instruction sent ahead of the user message.
    fn preamble(self, preamble: impl Into<String>) -> Self;

    /// Sampling temperature. Dropped for models that reject it.
    fn temperature(self, temperature: f32) -> Self;

    fn max_tokens(self, max_tokens: u32) -> Self;

    /// Send the request and return the text of the first choice.
    async fn send(self) -> Result<String>;
}
