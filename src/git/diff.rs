//! Tree-to-tree diffs between two refs using git2.

use git2::{Diff, DiffFormat, DiffOptions, DiffStatsFormat, Repository};

use crate::error::GitError;

use super::range::resolve_tree;

/// Maximum number of diff lines handed back before truncation.
pub const DEFAULT_MAX_DIFF_LINES: usize = 3000;

/// Column width used when rendering diff statistics.
const STAT_WIDTH: usize = 80;

/// Diff the trees of `from` and `to`, optionally restricted to `paths`.
///
/// Paths are matched literally, not as fnmatch patterns.
fn tree_diff<'r>(
    repo: &'r Repository,
    from: &str,
    to: &str,
    paths: &[String],
) -> Result<Diff<'r>, GitError> {
    let old_tree = resolve_tree(repo, from)?;
    let new_tree = resolve_tree(repo, to)?;

    let mut opts = DiffOptions::new();
    if !paths.is_empty() {
        opts.disable_pathspec_match(true);
        for p in paths {
            opts.pathspec(p);
        }
    }

    repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
        .map_err(GitError::DiffFailed)
}

/// List every path changed between `from` and `to`, ignored files included.
pub fn changed_files(repo: &Repository, from: &str, to: &str) -> Result<Vec<String>, GitError> {
    let diff = tree_diff(repo, from, to, &[])?;

    let mut files = Vec::new();
    for delta in diff.deltas() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string());

        if let Some(path) = path
            && !path.is_empty()
            && !files.contains(&path)
        {
            files.push(path);
        }
    }

    Ok(files)
}

/// Unified diff text for `files`, capped at `max_lines` lines.
///
/// Returns an empty string when `files` is empty.
pub fn diff_text(
    repo: &Repository,
    from: &str,
    to: &str,
    files: &[String],
    max_lines: usize,
) -> Result<String, GitError> {
    if files.is_empty() {
        return Ok(String::new());
    }

    let diff = tree_diff(repo, from, to, files)?;
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());

        // Include the origin character for content lines
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&content);

        true
    })
    .map_err(GitError::DiffFailed)?;

    Ok(truncate_lines(&text, max_lines))
}

/// Git-style `--stat` summary for `files`.
///
/// Returns an empty string when `files` is empty.
pub fn diff_stat(
    repo: &Repository,
    from: &str,
    to: &str,
    files: &[String],
) -> Result<String, GitError> {
    if files.is_empty() {
        return Ok(String::new());
    }

    let diff = tree_diff(repo, from, to, files)?;
    let stats = diff.stats().map_err(GitError::DiffFailed)?;
    let buf = stats
        .to_buf(DiffStatsFormat::FULL, STAT_WIDTH)
        .map_err(GitError::DiffFailed)?;

    Ok(stat_text(&buf))
}

/// Stat output as text. Paths that are not valid UTF-8 are kept lossily.
fn stat_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Keep the first `max_lines` lines of `text`, appending a notice with the
/// original line count when anything was cut.
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }

    format!(
        "{}\n\n... (diff too long, truncated, total {} lines) ...",
        lines[..max_lines].join("\n"),
        lines.len()
    )
}
