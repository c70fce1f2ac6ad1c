//! Per-module dependency graph: a flat table of nodes keyed by identity.

use std::collections::BTreeMap;

use impact_core::artifact::ArtifactId;
use impact_util::errors::{ImpactError, ImpactResult};

use crate::node::DependencyNode;

/// What happened when a node was stored in a [`ModuleGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// First occurrence of the identity.
    Inserted,
    /// The identity was already present and the two records were merged.
    /// `changed` is false when the new occurrence added no information.
    Merged { changed: bool },
}

/// The deduplicated dependency graph of one build module.
///
/// Holds exactly one [`DependencyNode`] per distinct [`ArtifactId`],
/// including the module's own root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
    root: ArtifactId,
    nodes: BTreeMap<ArtifactId, DependencyNode>,
}

impl ModuleGraph {
    /// An empty graph for the module identified by `root`.
    pub fn new(root: ArtifactId) -> Self {
        Self {
            root,
            nodes: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &ArtifactId {
        &self.root
    }

    pub fn root_node(&self) -> Option<&DependencyNode> {
        self.nodes.get(&self.root)
    }

    pub fn get(&self, id: &ArtifactId) -> Option<&DependencyNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &ArtifactId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of distinct artifacts, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.values()
    }

    /// Store `node`, merging it into an existing record with the same identity.
    ///
    /// The stored record is replaced by the merge result; the existing record
    /// is the first argument of the merge.
    pub fn insert_or_merge(&mut self, node: DependencyNode) -> InsertOutcome {
        match self.nodes.get(node.id()) {
            None => {
                self.nodes.insert(node.id().clone(), node);
                InsertOutcome::Inserted
            }
            Some(existing) => {
                let merged = existing.merge(&node);
                let changed = &merged != existing;
                self.nodes.insert(merged.id().clone(), merged);
                InsertOutcome::Merged { changed }
            }
        }
    }

    /// Merge every node of `other` into this graph.
    ///
    /// Both graphs must describe the same module root.
    pub fn absorb(&mut self, other: ModuleGraph) -> ImpactResult<()> {
        if other.root != self.root {
            return Err(ImpactError::Generic {
                message: format!(
                    "cannot combine graphs of different modules ({} and {})",
                    self.root, other.root
                ),
            }
            .into());
        }
        for node in other.nodes.into_values() {
            self.insert_or_merge(node);
        }
        Ok(())
    }

    /// Nodes that lost a version conflict.
    pub fn evictions(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.values().filter(|n| n.is_evicted())
    }

    /// Nodes pruned because they closed a cycle.
    pub fn cycles(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.values().filter(|n| n.cycle() == Some(true))
    }
}
