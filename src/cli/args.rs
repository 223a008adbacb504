//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `-r/--repo <PATH>`: local repository path (default: current directory)
//! - `-v/--version`: print the version and exit
//! - `-V/--verbose`: verbose diagnostics on stderr
//! - `-q/--quiet`: minimal output; overrides `--verbose` in any order
//! - `-p/--passthrough`: echo stdin to stdout for hook chaining
//! - `-k/--insecure`: accept invalid TLS certificates from the tracker
//! - `-h/--help`: show help
//!
//! The short version flag is lowercase `-v`; uppercase `-V` is verbose.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// git post-receive hook for FogBugz-style bug tracker integration
#[derive(Parser, Debug)]
#[command(name = "git-fogbugz")]
#[command(
    about,
    long_about = "git post-receive hook for FogBugz-style bug tracker integration.\n\n\
        Reads ref updates ('<old-sha> <new-sha> <ref-name>' per line) from stdin, \
        scans each pushed commit's message for a bug reference (bugzid, case, or \
        issue followed by a number), and notifies the tracker of every file the \
        commit changed.",
    after_help = "\
USAGE AS A HOOK:
    # .git/hooks/post-receive
    #!/bin/sh
    exec git-fogbugz --repo /srv/git/project.git https://tracker.example.com 4

CHAINING WITH OTHER HOOKS:
    git-fogbugz -p https://tracker.example.com 4 | /srv/hooks/notify-ci"
)]
pub struct Cli {
    /// Path to the local repository (defaults to the current directory)
    #[arg(short = 'r', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Verbose diagnostics on stderr
    #[arg(short = 'V', long = "verbose")]
    pub verbose: bool,

    /// Output as little as possible; overrides --verbose
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Echo each input line to stdout for chaining
    #[arg(short = 'p', long = "passthrough")]
    pub passthrough: bool,

    /// Accept invalid or self-signed TLS certificates from the tracker
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Base URL of the tracker service (e.g. https://tracker.example.com)
    #[arg(value_name = "TRACKER_URL", required_unless_present = "version")]
    pub tracker_url: Option<String>,

    /// Tracker-side repository identifier
    #[arg(value_name = "REPOSITORY_ID", required_unless_present = "version")]
    pub repository_id: Option<String>,
}

impl Cli {
    /// Parse the process argument vector.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    /// Render the full help text for the usage-failure path.
    pub fn render_usage() -> String {
        let mut cmd = Self::command();
        cmd.render_help().to_string()
    }
}
