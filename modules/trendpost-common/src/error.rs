use thiserror::Error;

/// Why an external provider produced nothing. Every variant is absorbed at the
/// stage boundary and turned into the next fallback step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{provider}: no credential configured")]
    Unavailable { provider: String },

    #[error("{provider}: request failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("{provider}: malformed response: {message}")]
    ResponseMalformed { provider: String, message: String },
}

impl ProviderError {
    pub fn unavailable(provider: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
        }
    }

    pub fn request_failed(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::RequestFailed {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::ResponseMalformed {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::Unavailable { provider }
            | Self::RequestFailed { provider, .. }
            | Self::ResponseMalformed { provider, .. } => provider,
        }
    }

    /// Missing credentials are an expected operating mode, not a fault.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
