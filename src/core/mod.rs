//! core
//!
//! Domain types and resolved configuration.
//!
//! # Responsibilities
//!
//! - [`types`] - Validated domain types ([`types::Oid`])
//! - [`config`] - The immutable [`config::Options`] record, constructed once
//!   at startup and passed by reference into each component

pub mod config;
pub mod types;
