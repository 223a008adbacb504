//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments into the immutable [`Options`] record
//! - Wire the repository reader and tracker client into the notifier
//! - Drive the stdin loop and report the exit status
//!
//! # Exit Behavior
//!
//! - 0 on normal completion and on `--help`/`--version`
//! - non-zero only for invalid configuration (bad flags, wrong positional
//!   count, unparseable tracker URL); usage text goes to stdout in that case
//!
//! A repository or tracker-client setup failure is NOT fatal: the run
//! degrades to passthrough-only so chained hooks still receive the payload.

pub mod args;

pub use args::Cli;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::core::config::Options;
use crate::git::Git;
use crate::hook;
use crate::notify::Notifier;
use crate::tracker::FogBugzTracker;
use crate::ui::output;

/// Run the hook.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => return Ok(report_parse_outcome(err)),
    };

    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    // Guaranteed present by clap when --version is absent.
    let (Some(tracker_url), Some(repository_id)) = (&cli.tracker_url, &cli.repository_id) else {
        println!("{}", Cli::render_usage());
        return Ok(ExitCode::FAILURE);
    };

    let options = match Options::resolve(
        cli.repo.clone(),
        tracker_url,
        repository_id.clone(),
        cli.verbose,
        cli.quiet,
        cli.passthrough,
        cli.insecure,
    ) {
        Ok(options) => options,
        Err(err) => {
            output::error(&err);
            println!("{}", Cli::render_usage());
            return Ok(ExitCode::FAILURE);
        }
    };

    run_with_options(&options).await
}

/// Drive one full run against resolved options.
async fn run_with_options(options: &Options) -> Result<ExitCode> {
    let verbosity = options.verbosity;
    output::verbose(format!("Start at {}", Utc::now().to_rfc3339()), verbosity);
    output::verbose(options.dump(), verbosity);
    if options.insecure {
        output::warn(
            "TLS certificate verification is disabled (--insecure)",
            verbosity,
        );
    }

    let notifier = match build_notifier(options) {
        Ok(notifier) => Some(notifier),
        Err(err) => {
            // Keep consuming stdin so passthrough and chained hooks work.
            output::error(format!("notifications disabled: {err:#}"));
            None
        }
    };

    let stdin = io::stdin();
    let stats = hook::process(stdin.lock(), notifier.as_ref(), options).await;

    output::verbose(
        format!(
            "{} line(s), {} commit(s), {} notification(s) sent, {} failed",
            stats.lines, stats.commits, stats.notified, stats.failed
        ),
        verbosity,
    );
    output::verbose(format!("Finished at {}", Utc::now().to_rfc3339()), verbosity);

    Ok(ExitCode::SUCCESS)
}

/// Open the repository and construct the tracker client.
fn build_notifier(options: &Options) -> Result<Notifier> {
    let git = Git::open(&options.repo)
        .with_context(|| format!("failed to open repository at {}", options.repo.display()))?;

    let tracker = FogBugzTracker::new(
        options.tracker_url.clone(),
        options.repository_id.clone(),
        options.insecure,
    )
    .context("failed to construct tracker client")?;

    Ok(Notifier::new(git, Box::new(tracker), options.verbosity))
}

/// Map a clap outcome to the documented exit behavior: help goes out as
/// rendered (exit 0), everything else prints usage to stdout and fails.
fn report_parse_outcome(err: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            println!("{}", err.render());
            ExitCode::FAILURE
        }
    }
}
