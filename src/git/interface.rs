//! git::interface
//!
//! Git interface implementation using git2.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants so the hook loop can
//! surface them per input line without unwinding the whole run:
//! - [`GitError::NotARepo`]: the configured path is not a Git repository
//! - [`GitError::ObjectNotFound`]: an id from the push payload does not
//!   resolve to a commit
//!
//! # Example
//!
//! ```ignore
//! use git_fogbugz::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for commit in git.commits_between("aaa111", "bbb222")? {
//!     println!("{}: {}", commit.oid.short(7), commit.summary);
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Oid;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// An id does not resolve to a commit in the repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The id that was not found
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

/// A commit introduced by a push, with the file paths it touched.
#[derive(Debug, Clone)]
pub struct CommitChange {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Paths changed relative to the first parent, in diff order
    pub files: Vec<String>,
}

/// The Git interface.
///
/// Read-only access to the local repository. Both bare repositories (the
/// normal home of a `post-receive` hook) and work trees are supported, and
/// discovery accepts any directory inside a work tree.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be the repository
    /// root, a bare repository directory, or any directory within a work
    /// tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Enumerate the commits reachable from `new` but not from `old`, in
    /// revwalk order (newest first).
    ///
    /// Both ids are resolved with rev-parse semantics, so abbreviated ids
    /// work as well as full ones.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if either id does not resolve to a
    ///   commit
    pub fn commits_between(&self, old: &str, new: &str) -> Result<Vec<CommitChange>, GitError> {
        let old_oid = self.resolve_commit(old)?;
        let new_oid = self.resolve_commit(new)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(new_oid)?;
        revwalk.hide(old_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(self.commit_change(oid?)?);
        }
        Ok(commits)
    }

    /// Resolve a revision string to a commit id.
    fn resolve_commit(&self, spec: &str) -> Result<git2::Oid, GitError> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|_| GitError::ObjectNotFound {
                oid: spec.to_string(),
            })?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitError::ObjectNotFound {
                oid: spec.to_string(),
            })?;
        Ok(commit.id())
    }

    /// Load a commit together with the file paths it changed.
    fn commit_change(&self, oid: git2::Oid) -> Result<CommitChange, GitError> {
        let commit = self.repo.find_commit(oid)?;

        Ok(CommitChange {
            oid: Oid::from(oid),
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            files: self.changed_files(&commit)?,
        })
    }

    /// Paths changed by a commit relative to its first parent.
    ///
    /// Root commits diff against the empty tree, so every path in the
    /// initial commit counts as changed.
    fn changed_files(&self, commit: &git2::Commit<'_>) -> Result<Vec<String>, GitError> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) {
                files.push(path.to_string_lossy().into_owned());
            }
        }
        Ok(files)
    }
}
