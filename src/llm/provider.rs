//! AI provider selection and per-provider settings.

use std::fmt;

use crate::config::{MODEL_ENV_VAR, non_empty_env};

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
    DeepSeek,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gemini, Provider::OpenAi, Provider::DeepSeek];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
            Provider::DeepSeek => "deepseek",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Endpoint URL. For Gemini, `{model}` is substituted at request time.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            }
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::OpenAi => "gpt-4o",
            Provider::DeepSeek => "deepseek-chat",
        }
    }

    /// Whether the provider speaks the OpenAI chat-completions wire format.
    pub fn is_openai_compatible(&self) -> bool {
        matches!(self, Provider::OpenAi | Provider::DeepSeek)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Provider::ALL.iter().map(|p| p.as_str()).collect();
                format!(
                    "Unsupported AI provider: {} (expected one of: {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Everything needed to address one provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Built-in endpoint and model, no credentials.
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            api_key: None,
        }
    }

    /// Built-in settings with the API key and model override read from the environment.
    pub fn from_env(provider: Provider) -> Self {
        let mut config = Self::new(provider);
        config.api_key = non_empty_env(provider.api_key_env());
        if let Some(model) = non_empty_env(MODEL_ENV_VAR) {
            config.model = model;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
