//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use changelog_ai::error::{AiError, GitError};
use changelog_ai::git::{CommitRecord, TagRecord, VcsSource};
use changelog_ai::llm::{Completer, CompletionRequest, ProviderConfig};
use git2::{Oid, Repository, Signature, Time};

/// Midnight UTC, 2024-01-01.
pub const JAN_1_2024: i64 = 1_704_067_200;

pub const DAY: i64 = 86_400;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature_at(&self, secs: i64) -> Signature<'static> {
        Signature::new("Test User", "test@example.com", &Time::new(secs, 0))
            .expect("Failed to create signature")
    }

    /// Commit `content` to `path` with a fixed timestamp. Returns the commit OID.
    pub fn commit_at(&self, message: &str, path: &str, content: &str, secs: i64) -> Oid {
        let sig = self.signature_at(secs);

        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit a change to `test.txt` dated 2024-01-01.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_at(message, "test.txt", message, JAN_1_2024)
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag with a fixed tagger time.
    pub fn tag_annotated_at(&self, name: &str, oid: Oid, secs: i64) {
        let sig = self.signature_at(secs);
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, name, false)
            .expect("Failed to create annotated tag");
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }
}

pub fn commit_record(hash: &str, date: &str, message: &str) -> CommitRecord {
    CommitRecord {
        hash: hash.to_string(),
        author: "Test User".to_string(),
        email: "test@example.com".to_string(),
        date: date.to_string(),
        message: message.to_string(),
    }
}

/// In-memory [`VcsSource`] that counts diff calls.
pub struct FakeVcs {
    pub commits: Vec<CommitRecord>,
    pub files: Vec<String>,
    pub diff: String,
    pub diff_calls: Cell<usize>,
    pub diff_stat_calls: Cell<usize>,
    /// File lists passed to `diff_text`, in call order.
    pub diff_scopes: std::cell::RefCell<Vec<Vec<String>>>,
}

impl FakeVcs {
    pub fn new(commits: Vec<CommitRecord>, files: &[&str]) -> Self {
        Self {
            commits,
            files: files.iter().map(|f| f.to_string()).collect(),
            diff: "+added line".to_string(),
            diff_calls: Cell::new(0),
            diff_stat_calls: Cell::new(0),
            diff_scopes: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), &[])
    }
}

impl VcsSource for FakeVcs {
    fn list_tags(&self) -> Result<Vec<TagRecord>, GitError> {
        Ok(Vec::new())
    }

    fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>, GitError> {
        if from == to {
            return Ok(Vec::new());
        }
        Ok(self.commits.clone())
    }

    fn changed_files(&self, _from: &str, _to: &str) -> Result<Vec<String>, GitError> {
        Ok(self.files.clone())
    }

    fn diff_text(&self, _from: &str, _to: &str, files: &[String]) -> Result<String, GitError> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        self.diff_scopes.borrow_mut().push(files.to_vec());
        Ok(self.diff.clone())
    }

    fn diff_stat(&self, _from: &str, _to: &str, files: &[String]) -> Result<String, GitError> {
        self.diff_stat_calls.set(self.diff_stat_calls.get() + 1);
        Ok(format!(" {} files changed, 3 insertions(+)", files.len()))
    }

    fn ref_exists(&self, _reference: &str) -> bool {
        true
    }
}

/// [`Completer`] returning a canned answer and counting calls.
pub struct StubCompleter {
    response: Option<String>,
    calls: AtomicUsize,
}

impl StubCompleter {
    pub fn answering(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A completer whose every call fails.
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Completer for StubCompleter {
    async fn complete(
        &self,
        _request: &CompletionRequest,
        provider: &ProviderConfig,
    ) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(AiError::Api {
                provider: provider.provider.to_string(),
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}
