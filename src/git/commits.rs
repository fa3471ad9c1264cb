//! Commit records for a ref range.

use chrono::{FixedOffset, TimeZone};
use git2::{Commit, Oid, Repository, Sort};

use crate::error::GitError;

/// Number of hash characters shown in reports and prompts.
pub const SHORT_HASH_LEN: usize = 7;

/// One commit in the analysed range.
///
/// `message` is the subject line only. It is carried as a whole field and
/// never re-split, so separator characters inside it are harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub email: String,
    /// Author date as `YYYY-MM-DD` in the author's own offset.
    pub date: String,
    pub message: String,
}

impl CommitRecord {
    /// Create a CommitRecord from a git2 Commit.
    pub fn from_git2_commit(commit: &Commit) -> Result<Self, GitError> {
        let hash = commit.id().to_string();
        let author = commit.author();
        let when = author.when();

        let date = format_git_time(when, "%Y-%m-%d").ok_or_else(|| GitError::InvalidTimestamp {
            hash: hash.clone(),
            seconds: when.seconds(),
        })?;

        Ok(Self {
            hash,
            author: author.name().unwrap_or("").to_string(),
            email: author.email().unwrap_or("").to_string(),
            date,
            message: commit.summary().unwrap_or("").to_string(),
        })
    }

    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..SHORT_HASH_LEN).unwrap_or(&self.hash)
    }
}

/// Render a git timestamp in its recorded offset.
pub(crate) fn format_git_time(time: git2::Time, fmt: &str) -> Option<String> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let datetime = offset.timestamp_opt(time.seconds(), 0).single()?;
    Some(datetime.format(fmt).to_string())
}

/// Fetch commits reachable from `to_oid` but not from `from_oid`, newest first.
pub fn fetch_commits(
    repo: &Repository,
    from_oid: Oid,
    to_oid: Oid,
) -> Result<Vec<CommitRecord>, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;

    revwalk
        .set_sorting(Sort::TIME)
        .map_err(GitError::RevwalkError)?;
    revwalk.push(to_oid).map_err(GitError::RevwalkError)?;
    revwalk.hide(from_oid).map_err(GitError::RevwalkError)?;

    let mut commits = Vec::new();

    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        commits.push(CommitRecord::from_git2_commit(&commit)?);
    }

    Ok(commits)
}
