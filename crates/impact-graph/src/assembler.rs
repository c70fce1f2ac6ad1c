//! Multi-module report assembly.
//!
//! A build can contain several modules, each producing its own
//! [`ModuleGraph`]. Entries are collected in a [`ReportAccumulator`] owned by
//! the orchestrator; the push that completes the set hands the entries back,
//! leaving the accumulator empty for the next build.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use impact_util::errors::{ImpactError, ImpactResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::ModuleGraph;
use crate::report::{producer, Report, FORMAT_VERSION};

/// Opaque identifier shared by every module of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BuildId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One module's contribution to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    /// Whether this module is the one the build was invoked on.
    pub execution_root: bool,
    pub graph: ModuleGraph,
}

impl ModuleEntry {
    pub fn new(name: impl Into<String>, graph: ModuleGraph) -> Self {
        Self {
            name: name.into(),
            execution_root: false,
            graph,
        }
    }

    pub fn with_execution_root(mut self, is_root: bool) -> Self {
        self.execution_root = is_root;
        self
    }
}

#[derive(Debug)]
struct Slots {
    entries: Vec<Option<ModuleEntry>>,
    filled: usize,
}

impl Slots {
    fn empty(expected: usize) -> Self {
        Self {
            entries: (0..expected).map(|_| None).collect(),
            filled: 0,
        }
    }
}

/// Collects module entries until every expected module has reported.
///
/// Storing an entry and checking whether it was the last one happen under a
/// single lock, so exactly one push observes completion even when modules
/// are processed concurrently.
#[derive(Debug)]
pub struct ReportAccumulator {
    expected: usize,
    slots: Mutex<Slots>,
}

impl ReportAccumulator {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            slots: Mutex::new(Slots::empty(expected)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `entry` in the next free position.
    ///
    /// Returns all entries, in position order, when this push completes the set.
    pub fn push(&self, entry: ModuleEntry) -> ImpactResult<Option<Vec<ModuleEntry>>> {
        let mut slots = self.lock();
        let index = slots
            .entries
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| ImpactError::Generic {
                message: format!("all {} module slots are already filled", self.expected),
            })?;
        Ok(Self::fill(&mut slots, self.expected, index, entry))
    }

    /// Store `entry` at reactor position `index`.
    ///
    /// Returns all entries, in position order, when this push completes the set.
    /// Filling a position twice is an error.
    pub fn push_at(
        &self,
        index: usize,
        entry: ModuleEntry,
    ) -> ImpactResult<Option<Vec<ModuleEntry>>> {
        let mut slots = self.lock();
        if index >= slots.entries.len() {
            return Err(ImpactError::Generic {
                message: format!(
                    "module position {index} is out of range for {} modules",
                    self.expected
                ),
            }
            .into());
        }
        if let Some(existing) = &slots.entries[index] {
            return Err(ImpactError::Generic {
                message: format!(
                    "module position {index} was already reported by {}",
                    existing.name
                ),
            }
            .into());
        }
        Ok(Self::fill(&mut slots, self.expected, index, entry))
    }

    fn fill(
        slots: &mut Slots,
        expected: usize,
        index: usize,
        entry: ModuleEntry,
    ) -> Option<Vec<ModuleEntry>> {
        slots.entries[index] = Some(entry);
        slots.filled += 1;
        if slots.filled < expected {
            return None;
        }
        let done = std::mem::replace(slots, Slots::empty(expected));
        Some(done.entries.into_iter().flatten().collect())
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock().filled
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return whatever entries are held, in position order.
    pub fn drain(&self) -> Vec<ModuleEntry> {
        let mut slots = self.lock();
        let done = std::mem::replace(&mut *slots, Slots::empty(self.expected));
        done.entries.into_iter().flatten().collect()
    }
}

/// Assemble the report for one build.
///
/// The project name is the execution-root module's name, or `current_module`
/// when no entry is marked. Module graphs are kept as they are: two modules
/// that share a dependency each list it.
pub fn assemble(entries: Vec<ModuleEntry>, current_module: &str, build_id: &BuildId) -> Report {
    let project_name = entries
        .iter()
        .find(|e| e.execution_root)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| current_module.to_string());

    tracing::debug!(
        project = %project_name,
        modules = entries.len(),
        build_id = %build_id,
        "assembled dependency report"
    );

    Report {
        project_name,
        build_id: build_id.clone(),
        modules: entries,
        format_version: FORMAT_VERSION.to_string(),
        producer: producer(),
    }
}
