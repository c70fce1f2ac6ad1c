//! Core data types for the impact dependency reporter.
//!
//! This crate defines the artifact identity used as the deduplication key,
//! the raw dependency tree handed over by the build tool, and the user
//! configuration for report submission.
//!
//! This crate is intentionally free of async code and network I/O.

/// Default base URL of the report service.
pub const DEFAULT_SERVICE_URL: &str = "https://updateimpact.com";

pub mod artifact;
pub mod config;
pub mod tree;
