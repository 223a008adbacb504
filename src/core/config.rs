//! core::config
//!
//! Resolved configuration for a single hook run.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values (repository path `.`, TLS verification on)
//! 2. CLI flags and positional arguments
//!
//! Quiet always wins over verbose, regardless of flag order.
//!
//! [`Options`] is constructed once at startup and never mutated; every
//! component receives it by reference.

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

use crate::ui::output::Verbosity;

/// Errors from configuration resolution.
///
/// These are the only process-fatal errors in the program: the run aborts
/// before any stdin processing when configuration is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tracker base URL does not parse or is not http(s).
    #[error("invalid tracker base URL '{url}': {message}")]
    InvalidTrackerUrl {
        /// The rejected URL string
        url: String,
        /// Description of the problem
        message: String,
    },
}

/// Immutable options for one run of the hook.
#[derive(Debug, Clone)]
pub struct Options {
    /// Path to the local repository (default: current directory).
    pub repo: PathBuf,
    /// Base URL of the tracker service (scheme, host, port).
    pub tracker_url: Url,
    /// Tracker-side repository identifier (`ixRepository`).
    pub repository_id: String,
    /// Output verbosity, with quiet taking precedence over verbose.
    pub verbosity: Verbosity,
    /// Echo each input line to stdout for hook chaining.
    pub passthrough: bool,
    /// Accept invalid or self-signed TLS certificates from the tracker.
    pub insecure: bool,
}

impl Options {
    /// Resolve options from parsed CLI input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTrackerUrl`] when the tracker base URL
    /// is not an absolute http(s) URL with a host.
    pub fn resolve(
        repo: Option<PathBuf>,
        tracker_url: &str,
        repository_id: impl Into<String>,
        verbose: bool,
        quiet: bool,
        passthrough: bool,
        insecure: bool,
    ) -> Result<Self, ConfigError> {
        let tracker_url = parse_tracker_url(tracker_url)?;

        Ok(Self {
            repo: repo.unwrap_or_else(|| PathBuf::from(".")),
            tracker_url,
            repository_id: repository_id.into(),
            verbosity: Verbosity::from_flags(quiet, verbose),
            passthrough,
            insecure,
        })
    }

    /// Render the resolved options for the verbose diagnostic dump.
    pub fn dump(&self) -> String {
        format!(
            "Options:\n  \
             repo = {}\n  \
             tracker_url = {}\n  \
             repository_id = {}\n  \
             verbosity = {:?}\n  \
             passthrough = {}\n  \
             insecure = {}",
            self.repo.display(),
            self.tracker_url,
            self.repository_id,
            self.verbosity,
            self.passthrough,
            self.insecure,
        )
    }
}

fn parse_tracker_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidTrackerUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidTrackerUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidTrackerUrl {
            url: raw.to_string(),
            message: "missing host".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(verbose: bool, quiet: bool) -> Options {
        Options::resolve(
            None,
            "https://tracker.example.com",
            "4",
            verbose,
            quiet,
            false,
            false,
        )
        .unwrap()
    }

    #[test]
    fn positionals_are_taken_verbatim() {
        let options = Options::resolve(
            None,
            "https://onebrave.fogbugz.com",
            "4",
            false,
            false,
            false,
            false,
        )
        .unwrap();
        assert_eq!(options.tracker_url.as_str(), "https://onebrave.fogbugz.com/");
        assert_eq!(options.repository_id, "4");
        assert_eq!(options.repo, PathBuf::from("."));
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(resolve(true, true).verbosity, Verbosity::Quiet);
        assert_eq!(resolve(true, false).verbosity, Verbosity::Verbose);
        assert_eq!(resolve(false, true).verbosity, Verbosity::Quiet);
        assert_eq!(resolve(false, false).verbosity, Verbosity::Normal);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(parse_tracker_url("ftp://tracker.example.com").is_err());
        assert!(parse_tracker_url("not a url").is_err());
        assert!(parse_tracker_url("unix:/run/tracker.sock").is_err());
    }

    #[test]
    fn accepts_explicit_port() {
        let url = parse_tracker_url("http://tracker.internal:8080").unwrap();
        assert_eq!(url.port(), Some(8080));
    }
}
