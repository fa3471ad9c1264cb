//! AI completion collaborator: trait plus the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config;
use crate::error::AiError;

use super::prompt::SYSTEM_PROMPT;
use super::provider::ProviderConfig;

/// Sampling temperature for summaries.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Upper bound on generated tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;

/// Characters of an error body kept for diagnostics.
const ERROR_BODY_EXCERPT: usize = 200;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Request with the fixed summary system instruction and default sampling.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Trait for text-completion backends.
///
/// This abstraction allows mocking the provider in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Completer: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(
        &self,
        request: &CompletionRequest,
        provider: &ProviderConfig,
    ) -> Result<String, AiError>;
}

/// Completer that calls the provider's HTTP API directly.
///
/// One request per call, bounded by a timeout; no retries.
pub struct HttpCompleter {
    client: Client,
    timeout: Duration,
}

impl HttpCompleter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// Completer with the timeout taken from `CHANGELOG_AI_TIMEOUT`.
    pub fn from_env() -> Self {
        Self::new(config::ai_timeout())
    }

    fn transport_error(&self, provider: &ProviderConfig, err: reqwest::Error) -> AiError {
        if err.is_timeout() {
            AiError::Timeout {
                provider: provider.provider.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            AiError::Network {
                provider: provider.provider.to_string(),
                // Gemini carries the key in the query string
                source: err.without_url(),
            }
        }
    }
}

#[async_trait]
impl Completer for HttpCompleter {
    async fn complete(
        &self,
        request: &CompletionRequest,
        provider: &ProviderConfig,
    ) -> Result<String, AiError> {
        let name = provider.provider.to_string();
        let api_key = provider
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey {
                provider: name.clone(),
                env_var: provider.provider.api_key_env().to_string(),
            })?;

        let openai_compatible = provider.provider.is_openai_compatible();

        let builder = if openai_compatible {
            self.client
                .post(&provider.base_url)
                .bearer_auth(api_key)
                .json(&json!({
                    "model": provider.model,
                    "messages": [
                        {"role": "system", "content": request.system},
                        {"role": "user", "content": request.prompt},
                    ],
                    "temperature": request.temperature,
                    "max_tokens": request.max_tokens,
                }))
        } else {
            let url = provider.base_url.replace("{model}", &provider.model);
            self.client
                .post(url)
                .query(&[("key", api_key)])
                .json(&json!({
                    "contents": [
                        {"parts": [{"text": format!("{}\n\n{}", request.system, request.prompt)}]}
                    ],
                    "generationConfig": {
                        "temperature": request.temperature,
                        "maxOutputTokens": request.max_tokens,
                    },
                }))
        };

        debug!(provider = %name, model = %provider.model, "Sending completion request");

        let response = builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(provider, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(provider, e))?;

        if !status.is_success() {
            return Err(AiError::Api {
                provider: name,
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_EXCERPT).collect(),
            });
        }

        let parsed = if openai_compatible {
            parse_chat_response(&body)
        } else {
            parse_gemini_response(&body)
        };
        let text = parsed.map_err(|detail| AiError::MalformedResponse {
            provider: name.clone(),
            detail,
        })?;

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse { provider: name });
        }

        Ok(text)
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Extract `choices[0].message.content` from a chat-completions body.
fn parse_chat_response(body: &str) -> Result<String, String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| "missing choices[0].message.content".to_string())
}

/// Extract `candidates[0].content.parts[0].text` from a Gemini body.
fn parse_gemini_response(body: &str) -> Result<String, String> {
    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| "missing candidates[0].content.parts[0].text".to_string())
}
