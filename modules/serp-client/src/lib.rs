pub mod error;
pub mod types;

pub use error::{Result, SerpError};
pub use types::{PeopleAlsoAsk, RelatedQuestion, RelatedSearch, SerpApiResponse, SerperResponse};

use std::time::Duration;

use types::{SerpApiParams, SerperRequest};

const SERPAPI_BASE_URL: &str = "https://serpapi.com";
const SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Error bodies end up in logs; keep them short.
const MAX_ERROR_BODY_CHARS: usize = 512;

fn build_http(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SerpError::Config(format!("Failed to build HTTP client: {e}")))
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SerpError::Api {
            status: status.as_u16(),
            message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

// --- SerpApi ---

pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http(timeout)?,
            api_key: api_key.into(),
            base_url: SERPAPI_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Run a Google search and return its related-search sections.
    pub async fn search(&self, query: &str) -> Result<SerpApiResponse> {
        tracing::debug!(query, "SerpApi search");

        let url = format!("{}/search.json", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&SerpApiParams::google_us(query, &self.api_key))
            .send()
            .await?;

        decode(resp).await
    }
}

// --- Serper ---

pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http(timeout)?,
            api_key: api_key.into(),
            base_url: SERPER_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Run a Google search through Serper and return its related-search sections.
    pub async fn search(&self, query: &str) -> Result<SerperResponse> {
        tracing::debug!(query, "Serper search");

        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&SerperRequest::us_english(query))
            .send()
            .await?;

        decode(resp).await
    }
}
