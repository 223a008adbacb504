//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. All repository reads flow through
//! this interface and no other module imports `git2`. The hook only ever
//! reads: it resolves pushed ranges and inspects commits, never mutating
//! refs or objects.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening (work trees and bare repositories)
//! - Range enumeration: commits reachable from `new` but not `old`
//! - Per-commit message and changed-file access

mod interface;

pub use interface::{CommitChange, Git, GitError};
