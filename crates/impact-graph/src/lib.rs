//! Dependency graph engine: flattens raw dependency trees into one
//! deduplicated graph per module, merges repeated occurrences of an
//! artifact, and assembles module graphs into a submittable report.

pub mod assembler;
pub mod builder;
pub mod eviction;
pub mod graph;
pub mod node;
pub mod report;
