//! hook
//!
//! Ref-update reader: the loop over the `post-receive` payload on stdin.
//!
//! # Input Format
//!
//! One line per updated ref, `<old-sha> <new-sha> <ref-name>`, whitespace
//! separated. Parsing is deliberately permissive: a line with fewer than two
//! tokens is skipped with a warning instead of aborting the run, and the ref
//! name is optional since nothing downstream consumes it.
//!
//! # Failure Isolation
//!
//! Each line is processed independently. A range that fails to resolve is
//! reported and skipped; later lines still run, and passthrough still echoes
//! every line in input order.

use std::io::BufRead;

use crate::core::config::Options;
use crate::notify::{Notifier, NotifyStats};
use crate::ui::output;

/// One parsed line of the push payload.
///
/// Ephemeral: exists only while its line is being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    /// Object id the ref pointed at before the push
    pub old: String,
    /// Object id the ref points at now
    pub new: String,
    /// Updated ref name, when present (unused downstream)
    pub refname: Option<String>,
}

impl RefUpdate {
    /// Parse a payload line. Returns `None` when fewer than two tokens are
    /// present; extra tokens beyond the third are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let old = tokens.next()?.to_string();
        let new = tokens.next()?.to_string();
        let refname = tokens.next().map(str::to_string);
        Some(Self { old, new, refname })
    }

    /// The ref was created by this push (old id is all zeros).
    pub fn is_create(&self) -> bool {
        is_zero_id(&self.old)
    }

    /// The ref was deleted by this push (new id is all zeros).
    pub fn is_delete(&self) -> bool {
        is_zero_id(&self.new)
    }
}

/// Git signals ref creation/deletion with an all-zero object id.
fn is_zero_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b == b'0')
}

/// Counters for one full hook run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Input lines consumed
    pub lines: usize,
    /// Commits enumerated across all lines
    pub commits: usize,
    /// Notifications delivered
    pub notified: usize,
    /// Notifications that failed in transit
    pub failed: usize,
}

impl RunStats {
    fn absorb(&mut self, range: NotifyStats) {
        self.commits += range.commits;
        self.notified += range.notified;
        self.failed += range.failed;
    }
}

/// Consume the payload until end-of-stream.
///
/// `notifier` is `None` when the repository or tracker client could not be
/// set up at startup; the loop then degrades to passthrough-only so hook
/// chaining keeps working.
pub async fn process<R: BufRead>(
    input: R,
    notifier: Option<&Notifier>,
    options: &Options,
) -> RunStats {
    let mut stats = RunStats::default();

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                output::warn(format!("failed to read stdin: {}", err), options.verbosity);
                break;
            }
        };

        stats.lines += 1;
        process_line(&line, notifier, options, &mut stats).await;

        if options.passthrough {
            println!("{}", line);
        }
    }

    stats
}

/// Process one line; failures are confined to this line.
async fn process_line(
    line: &str,
    notifier: Option<&Notifier>,
    options: &Options,
    stats: &mut RunStats,
) {
    let Some(update) = RefUpdate::parse(line) else {
        if !line.trim().is_empty() {
            output::warn(
                format!("skipping malformed input line: {:?}", line),
                options.verbosity,
            );
        }
        return;
    };

    let Some(notifier) = notifier else {
        return;
    };

    if update.is_create() || update.is_delete() {
        // No bounded range exists for these; nothing to notify.
        output::verbose(
            format!(
                "skipping ref {} for {}",
                if update.is_delete() { "deletion" } else { "creation" },
                update.refname.as_deref().unwrap_or("<unnamed>"),
            ),
            options.verbosity,
        );
        return;
    }

    match notifier.notify_range(&update.old, &update.new).await {
        Ok(range) => {
            output::verbose(
                format!(
                    "{}..{}: {} commit(s), {} notification(s)",
                    update.old, update.new, range.commits, range.notified
                ),
                options.verbosity,
            );
            stats.absorb(range);
        }
        Err(err) => {
            output::error(format!("skipping {}..{}: {}", update.old, update.new, err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_payload_line() {
        let update = RefUpdate::parse("aaa111 bbb222 refs/heads/main").unwrap();
        assert_eq!(update.old, "aaa111");
        assert_eq!(update.new, "bbb222");
        assert_eq!(update.refname.as_deref(), Some("refs/heads/main"));
    }

    #[test]
    fn tolerates_a_missing_ref_name() {
        let update = RefUpdate::parse("aaa111 bbb222").unwrap();
        assert_eq!(update.refname, None);
    }

    #[test]
    fn rejects_short_and_blank_lines() {
        assert_eq!(RefUpdate::parse("aaa111"), None);
        assert_eq!(RefUpdate::parse(""), None);
        assert_eq!(RefUpdate::parse("   "), None);
    }

    #[test]
    fn ignores_extra_tokens() {
        let update = RefUpdate::parse("a b refs/heads/x trailing junk").unwrap();
        assert_eq!(update.refname.as_deref(), Some("refs/heads/x"));
    }

    #[test]
    fn detects_creation_and_deletion() {
        let zero = "0".repeat(40);
        let create = RefUpdate::parse(&format!("{} bbb222 refs/heads/new", zero)).unwrap();
        assert!(create.is_create());
        assert!(!create.is_delete());

        let delete = RefUpdate::parse(&format!("bbb222 {} refs/heads/old", zero)).unwrap();
        assert!(delete.is_delete());
        assert!(!delete.is_create());
    }
}
