//! Git operations using git2-rs.
//!
//! The changelog pipeline only talks to [`VcsSource`]; [`GitSource`] is the
//! git2-backed implementation used by the binary.

pub mod commits;
pub mod diff;
pub mod ignore;
pub mod range;
pub mod tags;

use std::path::Path;

use git2::Repository;

use crate::error::GitError;

pub use commits::{CommitRecord, SHORT_HASH_LEN, fetch_commits};
pub use diff::{DEFAULT_MAX_DIFF_LINES, truncate_lines};
pub use ignore::{DEFAULT_IGNORE_PATTERNS, IgnoreRules};
pub use tags::{DEFAULT_TAGS_LIMIT, TagRecord, filter_by_date, list_tags, select_recent};

/// Version-control data consumed by the changelog pipeline.
///
/// Every ordered sequence is newest first.
pub trait VcsSource {
    /// All tags, newest first.
    fn list_tags(&self) -> Result<Vec<TagRecord>, GitError>;

    /// Commits reachable from `to` but not from `from`, newest first.
    /// Identical refs give an empty list.
    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>, GitError>;

    /// Every changed path, including files the ignore rules will later drop.
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, GitError>;

    /// Unified diff restricted to `files`, bounded by a line cap.
    fn diff_text(&self, from: &str, to: &str, files: &[String]) -> Result<String, GitError>;

    /// Diff statistics restricted to `files`.
    fn diff_stat(&self, from: &str, to: &str, files: &[String]) -> Result<String, GitError>;

    fn ref_exists(&self, reference: &str) -> bool;
}

/// Whether `path` is inside a git repository.
pub fn is_repository(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}

/// [`VcsSource`] backed by a git2 repository.
pub struct GitSource {
    repo: Repository,
    max_diff_lines: usize,
}

impl GitSource {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self::from_repository(repo))
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self {
            repo,
            max_diff_lines: DEFAULT_MAX_DIFF_LINES,
        }
    }

    /// Override the diff line cap.
    pub fn with_max_diff_lines(mut self, max_diff_lines: usize) -> Self {
        self.max_diff_lines = max_diff_lines;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }
}

impl VcsSource for GitSource {
    fn list_tags(&self) -> Result<Vec<TagRecord>, GitError> {
        tags::list_tags(&self.repo)
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>, GitError> {
        let from_oid = range::resolve_reference(&self.repo, from)?;
        let to_oid = range::resolve_reference(&self.repo, to)?;
        fetch_commits(&self.repo, from_oid, to_oid)
    }

    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, GitError> {
        diff::changed_files(&self.repo, from, to)
    }

    fn diff_text(&self, from: &str, to: &str, files: &[String]) -> Result<String, GitError> {
        diff::diff_text(&self.repo, from, to, files, self.max_diff_lines)
    }

    fn diff_stat(&self, from: &str, to: &str, files: &[String]) -> Result<String, GitError> {
        diff::diff_stat(&self.repo, from, to, files)
    }

    fn ref_exists(&self, reference: &str) -> bool {
        range::ref_exists(&self.repo, reference)
    }
}
