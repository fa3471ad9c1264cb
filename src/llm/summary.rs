//! AI summary orchestration: prompt, completion call, dry-run diagnostics.

use std::fmt;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::git::CommitRecord;

use super::client::{Completer, CompletionRequest};
use super::prompt::{SYSTEM_PROMPT, build_ai_prompt};
use super::provider::ProviderConfig;

/// Diff lines shown in the dry-run preview.
pub const DRY_RUN_DIFF_PREVIEW_LINES: usize = 100;

/// Outcome of the summary step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Text produced by the provider.
    Generated(String),
    /// Dry run: diagnostics were written, nothing was generated.
    DryRun,
    /// The provider yielded no usable content; the caller falls back.
    Unavailable,
}

/// Everything the summary step needs about one range.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub from_ref: &'a str,
    pub to_ref: &'a str,
    pub commits: &'a [CommitRecord],
    pub ignore_patterns: &'a [String],
    pub ignored_files: &'a [String],
    pub diff: &'a str,
    pub diff_stat: &'a str,
}

impl SummaryInput<'_> {
    pub fn prompt(&self) -> String {
        build_ai_prompt(
            self.from_ref,
            self.to_ref,
            self.commits,
            self.diff,
            self.diff_stat,
        )
    }
}

/// Run the summary step.
///
/// With `dry_run` set the completer is never called; the raw data and the
/// assembled prompt are written to `diagnostics` instead. Provider failures
/// are logged and reported as [`Summary::Unavailable`].
pub async fn summarize<C, W>(
    completer: &C,
    input: &SummaryInput<'_>,
    provider: &ProviderConfig,
    dry_run: bool,
    diagnostics: &mut W,
) -> std::io::Result<Summary>
where
    C: Completer + ?Sized,
    W: Write + ?Sized,
{
    if input.commits.is_empty() {
        return Ok(Summary::Unavailable);
    }

    let prompt = input.prompt();
    debug!(
        system_chars = SYSTEM_PROMPT.chars().count(),
        user_chars = prompt.chars().count(),
        "Built AI prompt"
    );

    if dry_run {
        let report = DryRunReport {
            input,
            system: SYSTEM_PROMPT,
            prompt: &prompt,
        };
        write!(diagnostics, "{}", report)?;
        diagnostics.flush()?;
        return Ok(Summary::DryRun);
    }

    info!(provider = %provider.provider, "Using AI to analyze code changes");

    match completer
        .complete(&CompletionRequest::new(prompt), provider)
        .await
    {
        Ok(text) => Ok(Summary::Generated(text)),
        Err(e) => {
            if e.is_network() {
                warn!(provider = %provider.provider, "AI provider unreachable: {}", e);
            } else {
                warn!(provider = %provider.provider, "AI provider rejected the request: {}", e);
            }
            Ok(Summary::Unavailable)
        }
    }
}

/// Operator-facing dump of what a live run would send.
struct DryRunReport<'a> {
    input: &'a SummaryInput<'a>,
    system: &'a str,
    prompt: &'a str,
}

impl fmt::Display for DryRunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "=".repeat(80);
        let sub_separator = "-".repeat(40);

        writeln!(f, "\n{}", separator)?;
        writeln!(f, "🔍 [DRY-RUN] AI API will not be called")?;
        writeln!(f, "{}", separator)?;

        writeln!(f, "\n{}\n🚫 Ignore patterns:\n{}", sub_separator, sub_separator)?;
        for pattern in self.input.ignore_patterns {
            writeln!(f, "  - {}", pattern)?;
        }
        if !self.input.ignored_files.is_empty() {
            writeln!(f, "\n  Excluded {} files:", self.input.ignored_files.len())?;
            for file in self.input.ignored_files {
                writeln!(f, "    - {}", file)?;
            }
        }

        writeln!(f, "\n{}\n📋 Commits:\n{}", sub_separator, sub_separator)?;
        for commit in self.input.commits {
            writeln!(
                f,
                "  [{}] {} | {}",
                commit.short_hash(),
                commit.date,
                commit.author
            )?;
            writeln!(f, "           {}", commit.message)?;
        }

        writeln!(f, "\n{}\n📊 Diff statistics:\n{}", sub_separator, sub_separator)?;
        writeln!(f, "{}", self.input.diff_stat)?;

        writeln!(
            f,
            "\n{}\n📝 Diff content (first {} lines):\n{}",
            sub_separator, DRY_RUN_DIFF_PREVIEW_LINES, sub_separator
        )?;
        let total_lines = self.input.diff.split('\n').count();
        for line in self.input.diff.split('\n').take(DRY_RUN_DIFF_PREVIEW_LINES) {
            writeln!(f, "{}", line)?;
        }
        if total_lines > DRY_RUN_DIFF_PREVIEW_LINES {
            writeln!(
                f,
                "\n... (total {} lines, showing first {}) ...",
                total_lines, DRY_RUN_DIFF_PREVIEW_LINES
            )?;
        }

        writeln!(f, "\n{}\n🤖 Prompt to be sent to AI:\n{}", separator, separator)?;
        writeln!(f, "\n[System Prompt]:\n{}\n{}", sub_separator, self.system)?;
        writeln!(f, "\n[User Prompt]:\n{}\n{}", sub_separator, self.prompt)?;

        let system_chars = self.system.chars().count();
        let user_chars = self.prompt.chars().count();
        writeln!(f, "\n{}", separator)?;
        writeln!(
            f,
            "📏 Prompt stats: System={} chars, User={} chars, Total={} chars",
            system_chars,
            user_chars,
            system_chars + user_chars
        )?;
        writeln!(f, "{}", separator)
    }
}
