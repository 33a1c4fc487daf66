//! Cross-checking ignore entries against repository history using git2-rs.

use crate::{IgnoreRevs, Issue, IssueKind};
use git2::{ErrorCode, ObjectType, Oid, Repository};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found at path: {0}")]
    RepositoryNotFound(String),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Report every well-formed entry that does not resolve to a commit.
///
/// Malformed hashes are skipped here; [`IgnoreRevs::validate`] already
/// reports them.
pub fn verify_in_repository(
    revs: &IgnoreRevs,
    repo_path: impl AsRef<Path>,
) -> HistoryResult<Vec<Issue>> {
    let repo_path = repo_path.as_ref();
    let repo = Repository::open(repo_path).map_err(|e| match e.code() {
        ErrorCode::NotFound => HistoryError::RepositoryNotFound(repo_path.display().to_string()),
        _ => HistoryError::Git(e),
    })?;

    let mut issues = Vec::new();
    for entry in revs.well_formed() {
        if !is_commit(&repo, &entry.hash)? {
            issues.push(Issue {
                line: entry.line,
                hash: entry.hash.clone(),
                kind: IssueKind::UnknownCommit,
            });
        }
    }

    debug!(
        checked = revs.well_formed().count(),
        unknown = issues.len(),
        "Verified ignore list against history"
    );

    Ok(issues)
}

fn is_commit(repo: &Repository, hash: &str) -> HistoryResult<bool> {
    let oid = Oid::from_str(hash)?;
    match repo.find_object(oid, Some(ObjectType::Commit)) {
        Ok(_) => Ok(true),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
