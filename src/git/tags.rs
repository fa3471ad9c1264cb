//! Tag enumeration and recent-tag selection.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use git2::{ObjectType, Oid, Repository};
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::error::{GitError, TagSelectionError};

use super::commits::format_git_time;

/// Default number of tags shown by `--list`.
pub const DEFAULT_TAGS_LIMIT: usize = 20;

/// A git tag with its display date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    /// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM` when the name embeds a CI timestamp.
    pub date: String,
}

static CI_TIMESTAMP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"rc_ci_(\d{12})").ok());

/// Extract the CI build timestamp embedded in tags like `app-rc_ci_202401051230`.
pub fn embedded_timestamp(tag_name: &str) -> Option<String> {
    let digits = CI_TIMESTAMP.as_ref()?.captures(tag_name)?.get(1)?.as_str();

    NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M")
        .ok()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Get all tags, newest first by creation date.
///
/// Annotated tags are dated by their tagger, lightweight tags by the commit
/// they point at. Ties are broken by name so the order is deterministic.
pub fn list_tags(repo: &Repository) -> Result<Vec<TagRecord>, GitError> {
    let mut raw: Vec<(Oid, String)> = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        if let Ok(name_str) = std::str::from_utf8(name_bytes) {
            let name = name_str
                .strip_prefix("refs/tags/")
                .unwrap_or(name_str)
                .to_string();
            raw.push((oid, name));
        } else {
            warn!("Skipping tag with OID {} - name is not valid UTF-8", oid);
        }
        true // Continue iteration
    })
    .map_err(GitError::TagsFailed)?;

    let mut dated: Vec<(i64, TagRecord)> = Vec::with_capacity(raw.len());

    for (oid, name) in raw {
        let Some(time) = creation_time(repo, oid) else {
            debug!(tag = %name, "Skipping tag that does not point at a commit");
            continue;
        };

        let date = embedded_timestamp(&name)
            .or_else(|| format_git_time(time, "%Y-%m-%d"))
            .unwrap_or_default();

        dated.push((time.seconds(), TagRecord { name, date }));
    }

    dated.sort_by(|(a_time, a), (b_time, b)| {
        b_time.cmp(a_time).then_with(|| a.name.cmp(&b.name))
    });

    Ok(dated.into_iter().map(|(_, tag)| tag).collect())
}

/// Creation time of the object a tag ref points at.
fn creation_time(repo: &Repository, oid: Oid) -> Option<git2::Time> {
    let object = repo.find_object(oid, None).ok()?;

    if object.kind() == Some(ObjectType::Tag) {
        let tag = object.as_tag()?;
        if let Some(tagger) = tag.tagger() {
            return Some(tagger.when());
        }
    }

    let commit = object.peel_to_commit().ok()?;
    Some(commit.committer().when())
}

/// Keep tags whose date contains `fragment` (e.g. `2024-01` or `2024-01-05`).
pub fn filter_by_date(tags: &[TagRecord], fragment: &str) -> Vec<TagRecord> {
    tags.iter()
        .filter(|t| t.date.contains(fragment))
        .cloned()
        .collect()
}

/// Pick the range spanning the `count` most recent tags.
///
/// Returns `(from, to)` where `to` is the newest tag and `from` is the
/// `count`-th newest.
///
/// # Precondition
///
/// `tags` must be ordered newest first, exactly as returned by [`list_tags`].
/// The order is not re-derived here: tag dates may come from embedded CI
/// timestamps with a different resolution than the sort key.
pub fn select_recent(
    tags: &[TagRecord],
    count: usize,
) -> Result<(&TagRecord, &TagRecord), TagSelectionError> {
    if count == 0 {
        return Err(TagSelectionError::ZeroCount);
    }
    if tags.len() < count {
        return Err(TagSelectionError::NotEnoughTags {
            available: tags.len(),
            requested: count,
        });
    }

    Ok((&tags[count - 1], &tags[0]))
}
