//! Dependency nodes and the merge of repeated occurrences.

use std::collections::HashSet;

use impact_core::artifact::ArtifactId;
use impact_core::tree::{NodeState, RawNode};
use serde::{Deserialize, Serialize};

/// One distinct artifact in a module graph.
///
/// Children are referenced by identity, so a module graph is a flat table
/// keyed by [`ArtifactId`] rather than a tree of owned nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    id: ArtifactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evicted_by_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cycle: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ArtifactId>,
}

impl DependencyNode {
    pub fn new(id: ArtifactId) -> Self {
        Self {
            id,
            evicted_by_version: None,
            cycle: None,
            children: Vec::new(),
        }
    }

    /// Replace the child list. Repeated identities collapse to their first position.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ArtifactId>) -> Self {
        self.children = Vec::new();
        union_into(&mut self.children, children);
        self
    }

    pub fn with_evicted_by(mut self, version: impl Into<String>) -> Self {
        self.evicted_by_version = Some(version.into());
        self
    }

    pub fn with_cycle(mut self) -> Self {
        self.cycle = Some(true);
        self
    }

    /// Build the node for one raw tree occurrence.
    ///
    /// Children are recorded for evicted and cycle nodes too.
    pub fn from_raw(raw: &RawNode) -> Self {
        let node = Self::new(raw.artifact.id())
            .with_children(raw.children.iter().map(|c| c.artifact.id()));
        match raw.state {
            NodeState::Included => node,
            NodeState::OmittedForConflict => match raw.evicting_version() {
                Some(version) => node.with_evicted_by(version),
                None => node,
            },
            NodeState::OmittedForCycle => node.with_cycle(),
        }
    }

    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    pub fn evicted_by_version(&self) -> Option<&str> {
        self.evicted_by_version.as_deref()
    }

    pub fn cycle(&self) -> Option<bool> {
        self.cycle
    }

    pub fn children(&self) -> &[ArtifactId] {
        &self.children
    }

    pub fn is_evicted(&self) -> bool {
        self.evicted_by_version.is_some()
    }

    /// Combine two occurrences of the same artifact into a new node.
    ///
    /// Flags take the first present value, `self` before `other`; this
    /// tie-break is fixed, so callers that care pass the earlier occurrence
    /// first. Children are the order-stable union of both lists.
    pub fn merge(&self, other: &DependencyNode) -> DependencyNode {
        debug_assert_eq!(self.id, other.id, "merging nodes with different identities");

        let mut children = self.children.clone();
        union_into(&mut children, other.children.iter().cloned());

        DependencyNode {
            id: self.id.clone(),
            evicted_by_version: self
                .evicted_by_version
                .clone()
                .or_else(|| other.evicted_by_version.clone()),
            cycle: self.cycle.or(other.cycle),
            children,
        }
    }
}

/// Append the identities in `extra` not already present in `target`.
fn union_into(target: &mut Vec<ArtifactId>, extra: impl IntoIterator<Item = ArtifactId>) {
    let mut seen: HashSet<ArtifactId> = target.iter().cloned().collect();
    for id in extra {
        if seen.insert(id.clone()) {
            target.push(id);
        }
    }
}
