//! AI provider settings, prompt construction, completion and summary.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod summary;

pub use client::{
    Completer, CompletionRequest, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, HttpCompleter,
};
pub use prompt::{MAX_PROMPT_DIFF_CHARS, SYSTEM_PROMPT, build_ai_prompt, truncate_chars};
pub use provider::{Provider, ProviderConfig};
pub use summary::{DRY_RUN_DIFF_PREVIEW_LINES, Summary, SummaryInput, summarize};
