//! Shared utilities for the impact dependency reporter.
//!
//! This crate provides cross-cutting concerns used by all other impact crates:
//! the error taxonomy, filesystem helpers, process spawning, and terminal
//! status output.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
