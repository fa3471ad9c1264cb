//! Prompt construction for the AI summary.

use crate::git::CommitRecord;

/// Maximum characters of diff text embedded in the prompt.
pub const MAX_PROMPT_DIFF_CHARS: usize = 50_000;

/// System instruction sent alongside every summary prompt.
pub const SYSTEM_PROMPT: &str = r#"You are a senior release engineer who writes release notes for software teams.
You read git commit logs and code diffs and explain what actually changed for the people who use and operate the software.

Rules:
- Describe functional changes, not commit messages. Never copy a commit subject verbatim.
- Merge related commits and diff hunks into a single point.
- Group the notes under short markdown headings (e.g. New Features, Bug Fixes, Improvements, Technical Changes) and omit empty groups.
- Use concise bullet points, one change per bullet.
- Do not invent changes that are not supported by the commits or the diff.
- Output markdown only, without a top-level title; the caller adds the title and range."#;

/// Build the user prompt for the summary request.
///
/// The diff text is cut hard at [`MAX_PROMPT_DIFF_CHARS`] characters.
pub fn build_ai_prompt(
    from_ref: &str,
    to_ref: &str,
    commits: &[CommitRecord],
    diff: &str,
    diff_stat: &str,
) -> String {
    let commit_text = commits
        .iter()
        .map(|c| {
            format!(
                "- [{}] {} (by {}, {})",
                c.short_hash(),
                c.message,
                c.author,
                c.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let diff_content = truncate_chars(diff, MAX_PROMPT_DIFF_CHARS);

    format!(
        r#"Analyze the following code changes and write a release summary.

## Version
From: {from_ref}
To: {to_ref}

## Commits ({count} commits)
{commit_text}

## File change statistics
{diff_stat}

## Code diff (git diff)
```diff
{diff_content}
```

Using the information above, write a clearly structured release summary. Focus on:
1. The actual functional changes (do not simply restate the commit messages)
2. Improvements users will notice
3. Problems that were fixed
4. Technical optimizations

Merge related changes so the output stays concise and well organized."#,
        count = commits.len(),
    )
}

/// Cut `text` after `max_chars` characters, marking the cut point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!(
            "{}\n... (diff truncated at {} characters) ...",
            &text[..byte_idx],
            max_chars
        ),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(hash: &str, message: &str) -> CommitRecord {
        CommitRecord {
            hash: hash.to_string(),
            author: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            date: "2024-01-05".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_build_prompt_structure() {
        let commits = vec![commit("0123456789abcdef", "feat: add | pipe in message")];
        let prompt = build_ai_prompt("v1.0.0", "v1.1.0", &commits, "+added", " 1 file changed");

        assert!(prompt.contains("From: v1.0.0"));
        assert!(prompt.contains("To: v1.1.0"));
        assert!(prompt.contains("## Commits (1 commits)"));
        assert!(prompt.contains("- [0123456] feat: add | pipe in message (by Grace, 2024-01-05)"));
        assert!(prompt.contains(" 1 file changed"));
        assert!(prompt.contains("```diff\n+added\n```"));
        assert!(prompt.contains("do not simply restate the commit messages"));
    }

    #[test]
    fn test_prompt_diff_is_cut_at_char_budget() {
        let diff = "x".repeat(MAX_PROMPT_DIFF_CHARS + 10);
        let prompt = build_ai_prompt("a", "b", &[], &diff, "");
        assert!(prompt.contains(&"x".repeat(MAX_PROMPT_DIFF_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_PROMPT_DIFF_CHARS + 1)));
        assert!(prompt.contains("diff truncated at 50000 characters"));
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("日本語", 3), "日本語");
        assert!(truncate_chars("日本語テキスト", 3).starts_with("日本語\n"));
    }
}
