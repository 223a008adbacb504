//! tracker::traits
//!
//! Tracker trait definition for notifying the bug tracker of file changes.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from tracker operations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

/// One file touched by one bug-referencing commit.
///
/// Each value produces exactly one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Numeric bug id captured from the commit message (string form)
    pub bug_id: String,
    /// Path of the changed file, relative to the repository root
    pub path: String,
    /// Abbreviated commit id (first 7 hex characters)
    pub new_rev: String,
}

/// A bug tracker that accepts per-file change notifications.
///
/// # Errors
///
/// `submit_change` returns `Err` only for transport-level failures. A
/// response with a non-success HTTP status is still `Ok`: the tracker's
/// answer is advisory and never interpreted.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Submit one file change, returning the response body for diagnostics.
    async fn submit_change(&self, change: &FileChange) -> Result<String, TrackerError>;
}
