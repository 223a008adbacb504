//! notify
//!
//! Commit notifier: turns a pushed `(old, new)` range into tracker
//! notifications.
//!
//! # Contract
//!
//! A commit with no bug reference produces zero outbound requests. A commit
//! with a match produces exactly one request per changed file. Requests are
//! issued strictly one at a time, in range order then diff order.
//!
//! # Failure Isolation
//!
//! Range resolution errors are returned to the caller, which isolates them
//! at the input-line boundary. Transport errors are absorbed here, per file:
//! a flaky request is counted and logged, and the loop moves on.

pub mod bugref;

use crate::core::types::Oid;
use crate::git::{CommitChange, Git, GitError};
use crate::tracker::{FileChange, Tracker};
use crate::ui::output::{self, Verbosity};

/// Length of the abbreviated commit id sent as the new revision token.
const SHORT_ID_LEN: usize = 7;

/// Counters for one notified range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyStats {
    /// Commits enumerated in the range
    pub commits: usize,
    /// Notifications delivered to the tracker
    pub notified: usize,
    /// Notifications that failed at the transport level
    pub failed: usize,
}

/// The commit notifier.
pub struct Notifier {
    git: Git,
    tracker: Box<dyn Tracker>,
    verbosity: Verbosity,
}

impl Notifier {
    /// Create a notifier over an opened repository and a tracker client.
    pub fn new(git: Git, tracker: Box<dyn Tracker>, verbosity: Verbosity) -> Self {
        Self {
            git,
            tracker,
            verbosity,
        }
    }

    /// Notify the tracker of every bug-referencing commit introduced
    /// between `old` and `new`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] when the range cannot be resolved; the caller
    /// decides how to surface it. Tracker failures never surface as errors.
    pub async fn notify_range(&self, old: &str, new: &str) -> Result<NotifyStats, GitError> {
        let commits = self.git.commits_between(old, new)?;

        let mut stats = NotifyStats {
            commits: commits.len(),
            ..NotifyStats::default()
        };
        for commit in &commits {
            self.notify_commit(commit, &mut stats).await;
        }
        Ok(stats)
    }

    /// Issue one notification per changed file if the commit references a
    /// bug; otherwise do nothing.
    async fn notify_commit(&self, commit: &CommitChange, stats: &mut NotifyStats) {
        let Some(bug) = bugref::extract(&commit.message) else {
            output::verbose(
                format!("{}: no bug reference, skipping", commit.oid.short(SHORT_ID_LEN)),
                self.verbosity,
            );
            return;
        };

        let new_rev = short_id(&commit.oid);
        for path in &commit.files {
            let change = FileChange {
                bug_id: bug.id.clone(),
                path: path.clone(),
                new_rev: new_rev.clone(),
            };
            match self.tracker.submit_change(&change).await {
                Ok(body) => {
                    stats.notified += 1;
                    output::verbose(
                        format!("bug {} {} -> {}", bug.id, new_rev, path),
                        self.verbosity,
                    );
                    if !body.is_empty() {
                        output::verbose(
                            format!("tracker response: {}", body.trim_end()),
                            self.verbosity,
                        );
                    }
                }
                Err(err) => {
                    stats.failed += 1;
                    output::warn(
                        format!("notification for {} failed: {}", path, err),
                        self.verbosity,
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("git", &self.git)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

/// The change-tracking token for a commit: its first 7 hex characters.
fn short_id(oid: &Oid) -> String {
    oid.short(SHORT_ID_LEN).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_exactly_seven_chars() {
        let oid = Oid::new("a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2").unwrap();
        assert_eq!(short_id(&oid), "a1b2c3d");
    }
}
