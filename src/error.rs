//! Error types for changelog-ai modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to compute diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to enumerate tags: {0}")]
    TagsFailed(#[source] git2::Error),

    #[error("Commit {hash} has invalid timestamp (seconds={seconds})")]
    InvalidTimestamp { hash: String, seconds: i64 },
}

/// Errors from choosing tags to compare.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TagSelectionError {
    #[error("Recent tag count must be at least 1")]
    ZeroCount,

    #[error("Only {available} tags available, cannot compare recent {requested}")]
    NotEnoughTags { available: usize, requested: usize },
}

/// Errors from the AI completion collaborator.
///
/// None of these are fatal to changelog generation: the summary step treats
/// every variant as "no result" and the pipeline falls back to basic mode.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("API key not configured for {provider}. Set the {env_var} environment variable")]
    MissingApiKey { provider: String, env_var: String },

    #[error("Network error talking to {provider}: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request timed out after {secs} seconds")]
    Timeout { provider: String, secs: u64 },

    #[error("{provider} API request failed: HTTP {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse { provider: String, detail: String },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },
}

impl AiError {
    /// True when the request never got an answer from the provider.
    pub fn is_network(&self) -> bool {
        matches!(self, AiError::Network { .. } | AiError::Timeout { .. })
    }
}

/// Errors from webhook delivery.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error(
        "Webhook URL is not configured. Set {env_var} environment variable or use --webhook-url",
        env_var = crate::config::WEBHOOK_URL_ENV_VAR
    )]
    MissingUrl,

    #[error("Webhook request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Webhook request timed out after {0} seconds")]
    Timeout(u64),

    #[error("HTTP Error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Webhook returned invalid JSON: {0}")]
    InvalidJson(String),
}

/// Errors from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Errors that abort changelog generation.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to write diagnostics: {0}")]
    Diagnostics(#[source] std::io::Error),
}

/// Errors from writing the changelog file.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to write changelog to {path}: {source}")]
    WriteFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
