use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serp_client::{SerpApiClient, SerpError, SerperClient};
use trendpost_common::{AppConfig, ProviderError};

use crate::traits::KeywordProvider;

fn classify(provider: &str, err: SerpError) -> ProviderError {
    match err {
        SerpError::Parse(message) => ProviderError::malformed(provider, message),
        other => ProviderError::request_failed(provider, other),
    }
}

// --- SerpApi ---

/// Related searches and related questions from SerpApi's Google engine.
pub struct SerpApiProvider {
    client: Option<SerpApiClient>,
}

impl SerpApiProvider {
    pub const NAME: &'static str = "serpapi";

    pub fn new(api_key: Option<&str>, timeout: Duration) -> serp_client::Result<Self> {
        let client = api_key
            .map(|key| SerpApiClient::new(key, timeout))
            .transpose()?;
        Ok(Self { client })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.map(|c| c.with_base_url(url));
        self
    }
}

#[async_trait]
impl KeywordProvider for SerpApiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<String>, ProviderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(Self::NAME))?;

        let response = client
            .search(query)
            .await
            .map_err(|e| classify(Self::NAME, e))?;

        let mut phrases = response.keyword_phrases();
        phrases.truncate(limit);
        Ok(phrases)
    }
}

// --- Serper ---

/// Related searches and "people also ask" questions from Serper.
pub struct SerperProvider {
    client: Option<SerperClient>,
}

impl SerperProvider {
    pub const NAME: &'static str = "serper";

    pub fn new(api_key: Option<&str>, timeout: Duration) -> serp_client::Result<Self> {
        let client = api_key
            .map(|key| SerperClient::new(key, timeout))
            .transpose()?;
        Ok(Self { client })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.map(|c| c.with_base_url(url));
        self
    }
}

#[async_trait]
impl KeywordProvider for SerperProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    async fn try_fetch(&self, query: &str, limit: usize) -> Result<Vec<String>, ProviderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ProviderError::unavailable(Self::NAME))?;

        let response = client
            .search(query)
            .await
            .map_err(|e| classify(Self::NAME, e))?;

        let mut phrases = response.keyword_phrases();
        phrases.truncate(limit);
        Ok(phrases)
    }
}

/// Keyword providers in priority order. Providers without a credential are
/// still listed; they report themselves unavailable.
pub fn build_keyword_providers(
    config: &AppConfig,
) -> serp_client::Result<Vec<Arc<dyn KeywordProvider>>> {
    let serpapi: Arc<dyn KeywordProvider> = Arc::new(SerpApiProvider::new(
        config.serpapi_key.as_deref(),
        config.http_timeout,
    )?);
    let serper: Arc<dyn KeywordProvider> = Arc::new(SerperProvider::new(
        config.serper_key.as_deref(),
        config.http_timeout,
    )?);
    Ok(vec![serpapi, serper])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_malformed_responses() {
        let err = classify("serper", SerpError::Parse("expected value".into()));
        assert!(matches!(err, ProviderError::ResponseMalformed { .. }));
    }

    #[test]
    fn status_and_network_errors_are_request_failures() {
        let err = classify(
            "serpapi",
            SerpError::Api {
                status: 429,
                message: "rate limited".into(),
            },
        );
        assert!(matches!(err, ProviderError::RequestFailed { .. }));
        assert!(err.to_string().contains("429"));

        let err = classify("serpapi", SerpError::Network("timed out".into()));
        assert!(matches!(err, ProviderError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn missing_key_means_unavailable() {
        let provider = SerperProvider::new(None, Duration::from_secs(1)).unwrap();
        assert!(!provider.has_credential());
        let err = provider.try_fetch("earbuds", 5).await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn offline_config_builds_providers_without_credentials() {
        let providers = build_keyword_providers(&AppConfig::offline()).unwrap();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["serpapi", "serper"]);
        assert!(providers.iter().all(|p| !p.has_credential()));
    }
}
