//! tracker::fogbugz
//!
//! FogBugz tracker implementation over its CVS-submit endpoint.
//!
//! # Protocol
//!
//! FogBugz ingests source-control activity through a single GET endpoint,
//! `/cvsSubmit.asp`, with five query parameters:
//!
//! - `ixBug` - the bug id from the commit message
//! - `sFile` - the changed file path
//! - `sPrev` - previous revision token (fixed placeholder, see below)
//! - `sNew` - new revision token (abbreviated commit id)
//! - `ixRepository` - tracker-side repository id
//!
//! The endpoint predates git and expects CVS-style per-file revision
//! numbers; `sPrev` is always the placeholder `00000` since git has no
//! per-file predecessor revision.
//!
//! # TLS
//!
//! Internal FogBugz deployments commonly run on self-signed certificates.
//! Certificate verification is on by default and can be relaxed with the
//! `insecure` toggle, which maps to
//! [`reqwest::ClientBuilder::danger_accept_invalid_certs`].

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::traits::{FileChange, Tracker, TrackerError};

/// Path of the FogBugz source-control submission endpoint.
const SUBMIT_PATH: &str = "/cvsSubmit.asp";

/// Placeholder for the CVS-style previous revision, which git cannot supply.
const PREV_PLACEHOLDER: &str = "00000";

/// FogBugz tracker implementation.
pub struct FogBugzTracker {
    /// HTTP client for making requests
    client: Client,
    /// Scheme, host, and port of the tracker
    base: Url,
    /// Tracker-side repository id (`ixRepository`)
    repository_id: String,
}

impl std::fmt::Debug for FogBugzTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FogBugzTracker")
            .field("base", &self.base.as_str())
            .field("repository_id", &self.repository_id)
            .finish()
    }
}

impl FogBugzTracker {
    /// Create a tracker client for the given base URL and repository id.
    ///
    /// With `insecure` set, invalid and self-signed TLS certificates are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Client`] if the HTTP client cannot be built.
    pub fn new(
        base: Url,
        repository_id: impl Into<String>,
        insecure: bool,
    ) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| TrackerError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base,
            repository_id: repository_id.into(),
        })
    }

    /// Build the submission URL for one file change.
    fn submit_url(&self, change: &FileChange) -> Url {
        let mut url = self.base.clone();
        url.set_path(SUBMIT_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("ixBug", &change.bug_id)
            .append_pair("sFile", &change.path)
            .append_pair("sPrev", PREV_PLACEHOLDER)
            .append_pair("sNew", &change.new_rev)
            .append_pair("ixRepository", &self.repository_id);
        url
    }
}

#[async_trait]
impl Tracker for FogBugzTracker {
    async fn submit_change(&self, change: &FileChange) -> Result<String, TrackerError> {
        let response = self
            .client
            .get(self.submit_url(change))
            .send()
            .await
            .map_err(|e| TrackerError::Network(e.to_string()))?;

        // Non-success statuses are not interpreted; the body is only kept
        // for verbose diagnostics.
        response
            .text()
            .await
            .map_err(|e| TrackerError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tracker(base: &str) -> FogBugzTracker {
        FogBugzTracker::new(Url::parse(base).unwrap(), "4", false).unwrap()
    }

    fn change() -> FileChange {
        FileChange {
            bug_id: "88".to_string(),
            path: "src/a.txt".to_string(),
            new_rev: "a1b2c3d".to_string(),
        }
    }

    #[test]
    fn submit_url_carries_all_five_parameters() {
        let url = tracker("https://tracker.example.com").submit_url(&change());

        assert_eq!(url.path(), "/cvsSubmit.asp");
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["ixBug"], "88");
        assert_eq!(query["sFile"], "src/a.txt");
        assert_eq!(query["sPrev"], "00000");
        assert_eq!(query["sNew"], "a1b2c3d");
        assert_eq!(query["ixRepository"], "4");
    }

    #[test]
    fn submit_url_keeps_host_and_port() {
        let url = tracker("http://tracker.internal:8080").submit_url(&change());
        assert_eq!(url.host_str(), Some("tracker.internal"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn insecure_client_still_builds() {
        let tracker =
            FogBugzTracker::new(Url::parse("https://tracker.example.com").unwrap(), "1", true);
        assert!(tracker.is_ok());
    }
}
