//! notify::bugref
//!
//! Bug-reference extraction from commit messages.
//!
//! # Pattern
//!
//! Case-insensitive `bugzid`, `case`, or `issue`, followed by an optional
//! whitespace/colon separator and one or more digits. Only the first match
//! in a message matters. `"Case: 42"`, `"issue123"`, and `"BUGZID 7"` all
//! match; `"casework"` does not (no trailing digits).

use std::sync::OnceLock;

use regex::Regex;

/// Keyword, optional separator run, captured digits.
const PATTERN: &str = r"(?i)(?:bugzid|case|issue)[\s:]*(\d+)";

/// A bug reference extracted from a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugReference {
    /// Numeric bug id, in string form
    pub id: String,
}

/// Extract the first bug reference from a commit message, if any.
///
/// # Example
///
/// ```
/// use git_fogbugz::notify::bugref;
///
/// let bug = bugref::extract("Fixes issue: 88\n\nDetails follow.").unwrap();
/// assert_eq!(bug.id, "88");
///
/// assert!(bugref::extract("routine casework").is_none());
/// ```
pub fn extract(message: &str) -> Option<BugReference> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(PATTERN).expect("bug reference pattern is valid"));

    re.captures(message).map(|caps| BugReference {
        id: caps[1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(message: &str) -> Option<String> {
        extract(message).map(|bug| bug.id)
    }

    #[test]
    fn matches_all_three_keywords() {
        assert_eq!(id("Case: 42"), Some("42".to_string()));
        assert_eq!(id("issue123"), Some("123".to_string()));
        assert_eq!(id("BUGZID 7"), Some("7".to_string()));
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(id("fixed CASE 9"), Some("9".to_string()));
        assert_eq!(id("Issue: 10"), Some("10".to_string()));
    }

    #[test]
    fn requires_trailing_digits() {
        assert_eq!(id("casework"), None);
        assert_eq!(id("no reference here"), None);
        assert_eq!(id("issue pending triage"), None);
    }

    #[test]
    fn only_first_match_matters() {
        assert_eq!(id("case 1 and also issue 2"), Some("1".to_string()));
    }

    #[test]
    fn matches_anywhere_in_multiline_messages() {
        let message = "Refactor widget pipeline\n\nCloses bugzid: 1234\n";
        assert_eq!(id(message), Some("1234".to_string()));
    }
}
