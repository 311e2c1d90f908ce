// Test mocks for the trendpost pipeline.
//
// Two mocks matching the two provider seams:
// - MockKeywordProvider (KeywordProvider) — canned phrases or a canned error
// - MockContentProvider (ContentProvider) — canned body or a canned error
//
// Plus product fixtures shared by unit and integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use trendpost_common::{KeywordSet, Product, ProductRecord, ProviderError};

use crate::traits::{ContentProvider, KeywordProvider};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn earbuds() -> Product {
    Product::new("Wireless Bluetooth Earbuds with Noise Cancellation", "electronics")
        .with_price("$49.99")
}

/// A raw record as the collection stage writes it.
pub fn record(name: &str, category: &str, price: &str) -> ProductRecord {
    ProductRecord {
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        price: Some(price.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// MockKeywordProvider
// ---------------------------------------------------------------------------

pub struct MockKeywordProvider {
    name: String,
    credential: bool,
    response: Result<Vec<String>, ProviderError>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockKeywordProvider {
    pub fn returning<'a>(name: &str, phrases: impl IntoIterator<Item = &'a str>) -> Self {
        Self::with_response(name, true, Ok(phrases.into_iter().map(String::from).collect()))
    }

    pub fn failing(name: &str, error: ProviderError) -> Self {
        Self::with_response(name, true, Err(error))
    }

    pub fn without_credential(name: &str) -> Self {
        Self::with_response(name, false, Err(ProviderError::unavailable(name)))
    }

    fn with_response(name: &str, credential: bool, response: Result<Vec<String>, ProviderError>) -> Self {
        Self {
            name: name.to_string(),
            credential,
            response,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeywordProvider for MockKeywordProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn try_fetch(&self, query: &str, _limit: usize) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// MockContentProvider
// ---------------------------------------------------------------------------

pub struct MockContentProvider {
    response: Result<String, ProviderError>,
    calls: AtomicUsize,
}

impl MockContentProvider {
    pub fn returning(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for MockContentProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _product: &Product, _keywords: &KeywordSet) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
