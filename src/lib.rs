//! changelog-ai - Generate release notes by diffing two git refs.
//!
//! # Overview
//!
//! changelog-ai collects the commits and diff between two refs, classifies the
//! commits by keyword into categories, and optionally asks an AI provider to
//! summarize the code changes. When the AI path yields nothing, the basic
//! categorized report is used instead. The result can be printed, written to
//! a file or pushed to a WeCom group webhook.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod notify;
pub mod pipeline;

// Re-export commonly used types
pub use changelog::{Category, ClassificationResult, build_basic, classify, format_message};
pub use error::{
    AiError, ChangelogError, ConfigError, GitError, PipelineError, TagSelectionError,
    WebhookError,
};
pub use git::{CommitRecord, GitSource, IgnoreRules, TagRecord, VcsSource};
pub use llm::{Completer, HttpCompleter, Provider, ProviderConfig, Summary};
pub use notify::{Notifier, WeComNotifier};
pub use pipeline::{ChangelogRequest, Mode, generate_changelog};
