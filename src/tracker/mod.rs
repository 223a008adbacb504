//! tracker
//!
//! Abstraction for the bug tracker's HTTP endpoint.
//!
//! # Design
//!
//! The [`Tracker`] trait is async because notifications involve network I/O.
//! The hook never depends on the tracker answering correctly: statuses and
//! bodies are advisory, and a failed submission is reported to the caller as
//! a value rather than unwinding the run.
//!
//! Implementations:
//! - [`fogbugz::FogBugzTracker`] - the real HTTP client
//! - [`mock::MockTracker`] - deterministic in-memory recorder for tests

pub mod fogbugz;
pub mod mock;
mod traits;

pub use fogbugz::FogBugzTracker;
pub use mock::MockTracker;
pub use traits::{FileChange, Tracker, TrackerError};
