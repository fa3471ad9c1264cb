//! Basic (non-AI) categorized report.

use super::classify::ClassificationResult;
use super::format::format_message;

/// Body used when there is nothing to report.
pub const NO_CHANGES_NOTICE: &str = "⚠️ No changes found\n";

/// Build the categorized markdown report.
///
/// Empty categories are omitted. The footer counts classified commits only;
/// skipped commits are not part of the total.
pub fn build_basic(
    classification: &ClassificationResult<'_>,
    changed_file_count: usize,
    diff_stat: &str,
    verbose: bool,
) -> String {
    if classification.is_empty() {
        return NO_CHANGES_NOTICE.to_string();
    }

    let sections: Vec<String> = classification
        .sections()
        .map(|(category, commits)| {
            let mut lines = vec![format!("## {}\n", category.label())];
            for commit in commits {
                let suffix = if verbose {
                    format!(" ({})", commit.short_hash())
                } else {
                    String::new()
                };
                lines.push(format!("- {}{}", format_message(&commit.message), suffix));
            }
            lines.join("\n")
        })
        .collect();

    let mut report = sections.join("\n\n");
    report.push_str(&format!(
        "\n\n---\n\n**Change stats**: {} changes across {} files\n",
        classification.total(),
        changed_file_count
    ));
    report.push_str(&details_block(diff_stat));

    report
}

/// Collapsible block holding the diff statistics, or "" when there are none.
pub fn details_block(diff_stat: &str) -> String {
    if diff_stat.is_empty() {
        return String::new();
    }

    format!(
        "\n<details>\n<summary>📈 File change details</summary>\n\n```\n{}\n```\n</details>\n",
        diff_stat
    )
}
