use std::time::Duration;

use super::error::{OpenAiError, OpenAiResult};

/// Endpoint used when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Model used when `OPENAI_MODEL` is not set; it must support JSON mode.
pub const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
/// Request timeout applied to every completion call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration describing how to reach the completion API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Construct a configuration for the public endpoint and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Select the model identifier sent with each request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> OpenAiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(OpenAiError::MissingEnvVar {
                var: "OPENAI_API_KEY",
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = non_empty_env("OPENAI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = non_empty_env("OPENAI_MODEL") {
            config = config.with_model(model);
        }

        Ok(config)
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
