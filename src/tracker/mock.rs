//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! Records every submitted change in memory and allows injecting transport
//! failures for specific file paths, so tests can exercise the per-request
//! isolation of the notifier.
//!
//! # Example
//!
//! ```
//! use git_fogbugz::tracker::{FileChange, MockTracker, Tracker};
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::new();
//! tracker
//!     .submit_change(&FileChange {
//!         bug_id: "7".to_string(),
//!         path: "a.txt".to_string(),
//!         new_rev: "abc1234".to_string(),
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(tracker.submitted().len(), 1);
//! # });
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{FileChange, Tracker, TrackerError};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    submitted: Arc<Mutex<Vec<FileChange>>>,
    fail_paths: Arc<Mutex<HashSet<String>>>,
}

impl MockTracker {
    /// Create a new mock tracker with no recorded changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a transport failure for every submission of `path`.
    pub fn fail_on(&self, path: impl Into<String>) {
        self.fail_paths
            .lock()
            .expect("mock tracker lock poisoned")
            .insert(path.into());
    }

    /// All successfully submitted changes, in submission order.
    pub fn submitted(&self) -> Vec<FileChange> {
        self.submitted
            .lock()
            .expect("mock tracker lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Tracker for MockTracker {
    async fn submit_change(&self, change: &FileChange) -> Result<String, TrackerError> {
        let failing = self
            .fail_paths
            .lock()
            .expect("mock tracker lock poisoned")
            .contains(&change.path);
        if failing {
            return Err(TrackerError::Network(format!(
                "injected failure for {}",
                change.path
            )));
        }

        self.submitted
            .lock()
            .expect("mock tracker lock poisoned")
            .push(change.clone());
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_submissions_in_order() {
        let tracker = MockTracker::new();
        tokio_test::block_on(async {
            for path in ["a.txt", "b.txt"] {
                tracker
                    .submit_change(&FileChange {
                        bug_id: "1".to_string(),
                        path: path.to_string(),
                        new_rev: "abc1234".to_string(),
                    })
                    .await
                    .unwrap();
            }
        });

        let submitted = tracker.submitted();
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[0].path, "a.txt");
        assert_eq!(submitted[1].path, "b.txt");
    }

    #[test]
    fn injected_failures_are_not_recorded() {
        let tracker = MockTracker::new();
        tracker.fail_on("b.txt");

        tokio_test::block_on(async {
            let change = FileChange {
                bug_id: "1".to_string(),
                path: "b.txt".to_string(),
                new_rev: "abc1234".to_string(),
            };
            assert!(tracker.submit_change(&change).await.is_err());
        });

        assert!(tracker.submitted().is_empty());
    }
}
