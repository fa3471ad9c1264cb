//! Top-level changelog assembly.
//!
//! Pulls data from a [`VcsSource`], filters ignored files, composes the header
//! and dispatches to the basic report or the AI summary.

use std::io::Write;

use tracing::{info, warn};

use crate::changelog::{NO_CHANGES_NOTICE, build_basic, classify, details_block};
use crate::error::PipelineError;
use crate::git::{CommitRecord, IgnoreRules, VcsSource};
use crate::llm::{Completer, ProviderConfig, Summary, SummaryInput, summarize};

/// Body returned in dry-run mode in place of generated content.
pub const DRY_RUN_PLACEHOLDER: &str =
    "\n[DRY-RUN mode - debug output above, no content generated]\n";

/// How the body of the changelog is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keyword classification of commit messages.
    #[default]
    Basic,
    /// AI summary, falling back to [`Mode::Basic`] when it yields nothing.
    Ai,
    /// Report what would be sent to the AI without sending it.
    DryRun,
}

/// Parameters of one changelog generation.
#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    pub from_ref: String,
    pub to_ref: String,
    pub mode: Mode,
    pub verbose: bool,
    pub provider: ProviderConfig,
    pub ignore: IgnoreRules,
}

/// Title, range and date span of the document.
///
/// `commits` is newest first, so the oldest date is the last element.
pub fn compose_header(from_ref: &str, to_ref: &str, commits: &[CommitRecord]) -> String {
    let mut header = format!("# Changelog\n\n**{} → {}**\n\n", from_ref, to_ref);

    if let (Some(newest), Some(oldest)) = (commits.first(), commits.last()) {
        let date_info = if oldest.date == newest.date {
            format!("📅 Release date: {}", newest.date)
        } else {
            format!("📅 Change period: {} ~ {}", oldest.date, newest.date)
        };
        header.push_str(&date_info);
        header.push_str("\n\n");
    }

    header
}

/// Footer appended to an AI summary. Counts every commit in the range,
/// unlike the basic report which counts classified commits only.
pub fn ai_footer(commit_count: usize, changed_file_count: usize, diff_stat: &str) -> String {
    let mut footer = format!(
        "\n\n---\n\n**Change stats**: {} commits across {} files\n",
        commit_count, changed_file_count
    );
    footer.push_str(&details_block(diff_stat));
    footer
}

/// Generate the changelog document for `request`.
///
/// Dry-run diagnostics go to `diagnostics`; the returned string is the
/// document only. AI failures never surface here: they are logged and the
/// basic report is used instead.
pub async fn generate_changelog<V, C, W>(
    vcs: &V,
    completer: &C,
    request: &ChangelogRequest,
    diagnostics: &mut W,
) -> Result<String, PipelineError>
where
    V: VcsSource + ?Sized,
    C: Completer + ?Sized,
    W: Write + ?Sized,
{
    let from = request.from_ref.as_str();
    let to = request.to_ref.as_str();
    info!("Analyzing changes: {} → {}", from, to);

    let commits = vcs.commits_between(from, to)?;
    if commits.is_empty() {
        info!("No commits in range");
        return Ok(format!(
            "{}{}",
            compose_header(from, to, &commits),
            NO_CHANGES_NOTICE
        ));
    }
    info!("Found {} commits", commits.len());

    let all_files = vcs.changed_files(from, to)?;
    let (changed_files, ignored_files) = request.ignore.partition(&all_files);
    if ignored_files.is_empty() {
        info!("{} file changes", changed_files.len());
    } else {
        info!(
            "{} file changes ({} files ignored)",
            changed_files.len(),
            ignored_files.len()
        );
    }

    let diff = vcs.diff_text(from, to, &changed_files)?;
    let diff_stat = vcs.diff_stat(from, to, &changed_files)?;

    let header = compose_header(from, to, &commits);

    let basic = || {
        let classified = classify(&commits);
        info!(
            "Classified {} commits, skipped {}",
            classified.total(),
            classified.skipped()
        );
        build_basic(
            &classified,
            changed_files.len(),
            &diff_stat,
            request.verbose,
        )
    };

    let body = match request.mode {
        Mode::Basic => basic(),
        Mode::Ai | Mode::DryRun => {
            let input = SummaryInput {
                from_ref: from,
                to_ref: to,
                commits: &commits,
                ignore_patterns: request.ignore.patterns(),
                ignored_files: &ignored_files,
                diff: &diff,
                diff_stat: &diff_stat,
            };
            let dry_run = request.mode == Mode::DryRun;
            let summary = summarize(completer, &input, &request.provider, dry_run, diagnostics)
                .await
                .map_err(PipelineError::Diagnostics)?;

            match summary {
                Summary::DryRun => DRY_RUN_PLACEHOLDER.to_string(),
                Summary::Generated(text) => {
                    format!(
                        "{}{}",
                        text,
                        ai_footer(commits.len(), changed_files.len(), &diff_stat)
                    )
                }
                Summary::Unavailable => {
                    warn!("AI analysis failed, falling back to basic mode");
                    basic()
                }
            }
        }
    };

    Ok(format!("{}{}", header, body))
}
