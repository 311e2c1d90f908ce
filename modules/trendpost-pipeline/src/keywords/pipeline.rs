use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use trendpost_common::{KeywordSet, Product};

use super::frequency::frequent_phrases;
use super::patterns::pattern_keywords;
use crate::traits::KeywordProvider;

/// Words of the product name that go into the provider query.
const QUERY_NAME_WORDS: usize = 4;

/// Phrases requested from each provider.
pub const PROVIDER_LIMIT: usize = 5;

/// Once providers have produced this many phrases, lower-priority ones are skipped.
pub const PROVIDER_SUFFICIENT: usize = 5;

/// Local generators run while fewer distinct candidates than this are collected.
pub const MIN_CANDIDATES: usize = 3;

/// One step of the keyword fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStrategy {
    Providers,
    Patterns,
    TextFrequency,
    ProductName,
}

impl KeywordStrategy {
    pub const CHAIN: [KeywordStrategy; 4] = [
        KeywordStrategy::Providers,
        KeywordStrategy::Patterns,
        KeywordStrategy::TextFrequency,
        KeywordStrategy::ProductName,
    ];

    /// Whether this step still has work to do given `distinct` candidates so far.
    pub fn should_run(self, distinct: usize) -> bool {
        match self {
            KeywordStrategy::Providers => true,
            KeywordStrategy::Patterns | KeywordStrategy::TextFrequency => distinct < MIN_CANDIDATES,
            KeywordStrategy::ProductName => distinct == 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KeywordStrategy::Providers => "providers",
            KeywordStrategy::Patterns => "patterns",
            KeywordStrategy::TextFrequency => "text_frequency",
            KeywordStrategy::ProductName => "product_name",
        }
    }
}

/// Selects keywords for one product: external providers first, then local
/// generators until enough candidates exist. Never fails.
pub struct KeywordPipeline {
    providers: Vec<Arc<dyn KeywordProvider>>,
}

impl KeywordPipeline {
    /// `providers` are consulted in the given order.
    pub fn new(providers: Vec<Arc<dyn KeywordProvider>>) -> Self {
        Self { providers }
    }

    /// No external providers; local generators only.
    pub fn local_only() -> Self {
        Self::new(Vec::new())
    }

    /// "{first four name words} {category}"
    pub fn query_for(product: &Product) -> String {
        format!("{} {}", product.name_prefix(QUERY_NAME_WORDS), product.category)
    }

    pub async fn select(&self, product: &Product) -> KeywordSet {
        let query = Self::query_for(product);
        let mut candidates: Vec<String> = Vec::new();

        for strategy in KeywordStrategy::CHAIN {
            if !strategy.should_run(distinct_count(&candidates)) {
                continue;
            }
            let found = self.run_strategy(strategy, product, &query).await;
            debug!(strategy = strategy.as_str(), count = found.len(), "Keyword strategy ran");
            candidates.extend(found);
        }

        let keywords = KeywordSet::from_candidates(candidates);
        info!(product = %product.name, keywords = %keywords.joined(), "Selected keywords");
        keywords
    }

    async fn run_strategy(
        &self,
        strategy: KeywordStrategy,
        product: &Product,
        query: &str,
    ) -> Vec<String> {
        match strategy {
            KeywordStrategy::Providers => self.from_providers(query).await,
            KeywordStrategy::Patterns => pattern_keywords(&product.name, &product.category),
            KeywordStrategy::TextFrequency => frequent_phrases(&product.name),
            KeywordStrategy::ProductName => vec![product.name.trim().to_string()],
        }
    }

    /// Providers are tried cumulatively in priority order until enough phrases exist.
    async fn from_providers(&self, query: &str) -> Vec<String> {
        if !self.providers.iter().any(|p| p.has_credential()) {
            debug!("No keyword provider credentials, using local generation");
            return Vec::new();
        }

        let mut found = Vec::new();
        for provider in &self.providers {
            if found.len() >= PROVIDER_SUFFICIENT {
                debug!(provider = provider.name(), "Enough provider keywords, skipping");
                continue;
            }
            if !provider.has_credential() {
                continue;
            }
            found.extend(provider.fetch(query, PROVIDER_LIMIT).await);
        }
        found
    }
}

fn distinct_count(candidates: &[String]) -> usize {
    candidates
        .iter()
        .filter(|c| !c.trim().is_empty())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{earbuds, MockKeywordProvider};
    use trendpost_common::ProviderError;

    fn pipeline(providers: Vec<Arc<MockKeywordProvider>>) -> KeywordPipeline {
        KeywordPipeline::new(
            providers
                .into_iter()
                .map(|p| p as Arc<dyn KeywordProvider>)
                .collect(),
        )
    }

    #[test]
    fn query_joins_first_four_words_and_category() {
        assert_eq!(
            KeywordPipeline::query_for(&earbuds()),
            "Wireless Bluetooth Earbuds with electronics"
        );
    }

    #[tokio::test]
    async fn no_credentials_uses_pattern_keywords() {
        let keywords = KeywordPipeline::local_only().select(&earbuds()).await;
        assert_eq!(
            keywords.as_slice(),
            [
                "best Wireless Bluetooth Earbuds with Noise Cancellation",
                "Wireless Bluetooth Earbuds with Noise Cancellation review",
                "Wireless Bluetooth Earbuds with Noise Cancellation vs",
                "Wireless Bluetooth Earbuds with Noise Cancellation features",
            ]
        );
    }

    #[tokio::test]
    async fn provider_keywords_take_priority_and_suppress_fallbacks() {
        let serp = Arc::new(MockKeywordProvider::returning(
            "serp",
            ["earbuds 2026", "best earbuds", "earbuds anc", "are earbuds safe?"],
        ));
        let keywords = pipeline(vec![serp.clone()]).select(&earbuds()).await;

        assert_eq!(
            keywords.as_slice(),
            ["earbuds 2026", "best earbuds", "earbuds anc", "are earbuds safe?"]
        );
        assert_eq!(serp.last_query().as_deref(), Some("Wireless Bluetooth Earbuds with electronics"));
    }

    #[tokio::test]
    async fn duplicate_keyword_keeps_provider_position() {
        let serp = Arc::new(MockKeywordProvider::returning("serp", ["best earbuds"]));
        let product = Product::new("earbuds", "electronics");

        let keywords = pipeline(vec![serp]).select(&product).await;

        assert_eq!(keywords.as_slice()[0], "best earbuds");
        assert_eq!(keywords.iter().filter(|k| *k == "best earbuds").count(), 1);
        assert_eq!(
            keywords.as_slice(),
            ["best earbuds", "top earbuds electronics", "earbuds review", "affordable earbuds"]
        );
    }

    #[tokio::test]
    async fn second_provider_skipped_when_first_is_sufficient() {
        let first = Arc::new(MockKeywordProvider::returning("first", ["a1", "a2", "a3", "a4", "a5"]));
        let second = Arc::new(MockKeywordProvider::returning("second", ["b1"]));

        pipeline(vec![first.clone(), second.clone()]).select(&earbuds()).await;

        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn providers_accumulate_until_sufficient() {
        let first = Arc::new(MockKeywordProvider::returning("first", ["a1"]));
        let second = Arc::new(MockKeywordProvider::returning("second", ["b1", "b2"]));

        let keywords = pipeline(vec![first.clone(), second.clone()]).select(&earbuds()).await;

        assert_eq!(second.calls(), 1);
        assert_eq!(keywords.as_slice(), ["a1", "b1", "b2"]);
    }

    #[tokio::test]
    async fn providers_without_credentials_are_not_called() {
        let keyed = Arc::new(MockKeywordProvider::returning("keyed", ["k1", "k2", "k3"]));
        let unkeyed = Arc::new(MockKeywordProvider::without_credential("unkeyed"));

        pipeline(vec![unkeyed.clone(), keyed.clone()]).select(&earbuds()).await;

        assert_eq!(unkeyed.calls(), 0);
        assert_eq!(keyed.calls(), 1);
    }

    #[tokio::test]
    async fn failing_providers_fall_back_to_patterns() {
        let down = Arc::new(MockKeywordProvider::failing(
            "down",
            ProviderError::request_failed("down", "connection refused"),
        ));
        let product = Product::new("UltraWidget", "home-kitchen");

        let keywords = pipeline(vec![down]).select(&product).await;

        assert_eq!(
            keywords.as_slice(),
            ["best UltraWidget", "top UltraWidget home-kitchen", "UltraWidget review", "affordable UltraWidget"]
        );
    }

    #[tokio::test]
    async fn text_frequency_fills_in_for_long_names() {
        let product = Product::new(
            "Professional Grade Stainless Steel Countertop Convection Toaster Oven",
            "home-kitchen",
        );

        let keywords = KeywordPipeline::local_only().select(&product).await;

        assert_eq!(
            keywords.as_slice(),
            ["professional", "grade", "stainless", "steel"]
        );
    }

    #[tokio::test]
    async fn product_name_is_the_last_resort() {
        // Too long for any pattern, and every token is a stop word or too short.
        let name = format!("the and {}", "a ".repeat(40).trim());
        let product = Product::new(name.clone(), "misc");

        let keywords = KeywordPipeline::local_only().select(&product).await;

        assert_eq!(keywords.as_slice(), [name]);
    }

    #[tokio::test]
    async fn selection_is_deterministic() {
        let product = earbuds();
        let pipeline = KeywordPipeline::local_only();
        assert_eq!(pipeline.select(&product).await, pipeline.select(&product).await);
    }

    #[test]
    fn chain_predicates() {
        assert!(KeywordStrategy::Providers.should_run(10));
        assert!(KeywordStrategy::Patterns.should_run(2));
        assert!(!KeywordStrategy::Patterns.should_run(3));
        assert!(KeywordStrategy::TextFrequency.should_run(0));
        assert!(!KeywordStrategy::ProductName.should_run(1));
    }
}
