use std::str::FromStr;
use std::time::Duration;

use crate::error::PipelineError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Read once at startup and passed into every component constructor.
/// A missing credential simply disables the matching provider.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Content provider
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,

    // Keyword providers
    pub serpapi_key: Option<String>,
    pub serper_key: Option<String>,

    // Politeness / resource bounds
    pub http_timeout: Duration,
    pub keyword_delay: Duration,
    pub content_delay: Duration,
    pub concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build from an arbitrary key lookup so callers can inject values
    /// without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let secret = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let concurrency: usize = parse_or(&lookup, "PIPELINE_CONCURRENCY", 1)?;
        if concurrency == 0 {
            return Err(PipelineError::Config(
                "PIPELINE_CONCURRENCY must be at least 1".into(),
            ));
        }

        Ok(Self {
            openai_api_key: secret("OPENAI_API_KEY"),
            openai_model: secret("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: secret("OPENAI_BASE_URL"),
            serpapi_key: secret("SERPAPI_KEY"),
            serper_key: secret("SERPER_KEY"),
            http_timeout: Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 20)?),
            keyword_delay: Duration::from_millis(parse_or(&lookup, "KEYWORD_DELAY_MS", 1000)?),
            content_delay: Duration::from_millis(parse_or(&lookup, "CONTENT_DELAY_MS", 2000)?),
            concurrency,
        })
    }

    /// No credentials, no delays. Everything runs on the local fallbacks.
    pub fn offline() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: None,
            serpapi_key: None,
            serper_key: None,
            http_timeout: Duration::from_secs(20),
            keyword_delay: Duration::ZERO,
            content_delay: Duration::ZERO,
            concurrency: 1,
        }
    }

    pub fn has_keyword_credentials(&self) -> bool {
        self.serpapi_key.is_some() || self.serper_key.is_some()
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let prefix: String = v.chars().take(5).collect();
                    format!("{}...({} chars)", prefix, v.len())
                }
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  OPENAI_API_KEY: {}", preview_opt(&self.openai_api_key));
        tracing::info!("  OPENAI_MODEL: {}", self.openai_model);
        tracing::info!("  SERPAPI_KEY: {}", preview_opt(&self.serpapi_key));
        tracing::info!("  SERPER_KEY: {}", preview_opt(&self.serper_key));
        tracing::info!(
            timeout_secs = self.http_timeout.as_secs(),
            keyword_delay_ms = self.keyword_delay.as_millis() as u64,
            content_delay_ms = self.content_delay.as_millis() as u64,
            concurrency = self.concurrency,
            "  limits"
        );
        if !self.has_keyword_credentials() {
            tracing::warn!("No keyword provider keys found. Using local keyword generation.");
        }
        if self.openai_api_key.is_none() {
            tracing::warn!("OpenAI API key not found. Using template content generation.");
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, PipelineError> {
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|_| PipelineError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}
