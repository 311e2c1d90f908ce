// Provider seams for the two pipeline stages.
//
// KeywordProvider wraps one search-data source. ContentProvider wraps one
// text-generation source. Both report failure as a ProviderError; the
// pipelines turn any error into the next fallback step.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use trendpost_common::{KeywordSet, Product, ProviderError};

// ---------------------------------------------------------------------------
// KeywordProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait KeywordProvider: Send + Sync {
    /// Short identifier used in logs ("serpapi", "serper", ...).
    fn name(&self) -> &str;

    /// Whether a credential for this source is configured.
    fn has_credential(&self) -> bool;

    /// Related-search and question phrases for `query`, or the reason there are none.
    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<String>, ProviderError>;

    /// Up to `limit` phrases for `query`. Never fails: every error is logged
    /// and reported as an empty result.
    async fn fetch(&self, query: &str, limit: usize) -> Vec<String> {
        match self.try_fetch(query, limit).await {
            Ok(mut phrases) => {
                phrases.truncate(limit);
                info!(provider = self.name(), query, count = phrases.len(), "Keyword provider returned phrases");
                phrases
            }
            Err(e) if e.is_unavailable() => {
                debug!(provider = self.name(), "Keyword provider has no credential, skipping");
                Vec::new()
            }
            Err(e) => {
                warn!(provider = e.provider(), query, error = %e, "Keyword provider failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ContentProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContentProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Blog body text for `product` that works in `keywords`.
    async fn generate(&self, product: &Product, keywords: &KeywordSet) -> Result<String, ProviderError>;
}

/// Content provider for when no LLM credential is configured.
pub struct NoopContentProvider;

#[async_trait]
impl ContentProvider for NoopContentProvider {
    fn name(&self) -> &str {
        "none"
    }

    async fn generate(&self, _product: &Product, _keywords: &KeywordSet) -> Result<String, ProviderError> {
        Err(ProviderError::unavailable(self.name()))
    }
}
