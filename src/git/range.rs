//! Reference resolution.

use git2::{Oid, Repository, Tree};

use crate::error::GitError;

/// Resolve a reference (tag, branch, commit hash) to a commit OID.
pub fn resolve_reference(repo: &Repository, reference: &str) -> Result<Oid, GitError> {
    // Try as a direct OID first
    if let Ok(oid) = Oid::from_str(reference)
        && repo.find_commit(oid).is_ok()
    {
        return Ok(oid);
    }

    // Try as a revspec (branch, tag, HEAD~2, ...)
    if let Ok(obj) = repo.revparse_single(reference) {
        return Ok(obj.peel_to_commit().map_err(GitError::ParseCommit)?.id());
    }

    Err(GitError::ReferenceNotFound(
        reference.to_string(),
        git2::Error::from_str("Reference not found"),
    ))
}

/// Resolve a reference to the tree of the commit it points at.
pub fn resolve_tree<'r>(repo: &'r Repository, reference: &str) -> Result<Tree<'r>, GitError> {
    let oid = resolve_reference(repo, reference)?;
    let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
    commit.tree().map_err(GitError::ParseCommit)
}

/// Whether `reference` resolves to a commit.
pub fn ref_exists(repo: &Repository, reference: &str) -> bool {
    resolve_reference(repo, reference).is_ok()
}
