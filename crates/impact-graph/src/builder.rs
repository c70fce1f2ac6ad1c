//! Module graph construction from raw dependency trees.
//!
//! The raw tree is walked once, depth-first and pre-order, with an explicit
//! stack. Every occurrence becomes a [`DependencyNode`]; an identity that
//! was already stored is merged rather than dropped.

use impact_core::tree::RawNode;
use impact_util::errors::{ImpactError, ImpactResult};

use crate::graph::{InsertOutcome, ModuleGraph};
use crate::node::DependencyNode;

/// Counters collected while building a module graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Raw tree nodes visited.
    pub visited: usize,
    /// Occurrences that hit an identity already in the graph.
    pub merged: usize,
    /// Merges where the two occurrences disagreed.
    pub divergent: usize,
}

/// Incremental builder for one module's graph.
///
/// Each call to [`GraphBuilder::add_tree`] is one traversal pass; passes are
/// merged into the same graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Option<ModuleGraph>,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Traverse `tree` into the graph under construction.
    ///
    /// Every pass must share the root artifact of the first one.
    pub fn add_tree(&mut self, tree: &RawNode) -> ImpactResult<()> {
        let root = tree.artifact.id();
        let graph = self.graph.get_or_insert_with(|| ModuleGraph::new(root.clone()));
        if graph.root() != &root {
            return Err(ImpactError::TreeBuild {
                message: format!(
                    "tree rooted at {root} cannot be added to the graph of {}",
                    graph.root()
                ),
            }
            .into());
        }
        traverse(graph, tree, &mut self.stats);
        Ok(())
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Finish building and return the graph.
    pub fn finish(self) -> ImpactResult<ModuleGraph> {
        let graph = self.graph.ok_or_else(|| ImpactError::TreeBuild {
            message: "no dependency tree was added to the graph builder".to_string(),
        })?;
        tracing::debug!(
            root = %graph.root(),
            visited = self.stats.visited,
            distinct = graph.len(),
            merged = self.stats.merged,
            "module graph built"
        );
        Ok(graph)
    }
}

/// Build the graph of one module from its raw tree in a single pass.
pub fn build_module_graph(tree: &RawNode) -> ModuleGraph {
    let mut graph = ModuleGraph::new(tree.artifact.id());
    let mut stats = BuildStats::default();
    traverse(&mut graph, tree, &mut stats);
    tracing::debug!(
        root = %graph.root(),
        visited = stats.visited,
        distinct = graph.len(),
        merged = stats.merged,
        "module graph built"
    );
    graph
}

fn traverse(graph: &mut ModuleGraph, tree: &RawNode, stats: &mut BuildStats) {
    let mut stack: Vec<&RawNode> = vec![tree];
    while let Some(raw) = stack.pop() {
        stats.visited += 1;

        match graph.insert_or_merge(DependencyNode::from_raw(raw)) {
            InsertOutcome::Inserted => {}
            InsertOutcome::Merged { changed: false } => {
                stats.merged += 1;
                tracing::debug!("duplicate dependency {}", raw.artifact.id());
            }
            InsertOutcome::Merged { changed: true } => {
                stats.merged += 1;
                stats.divergent += 1;
                tracing::warn!(
                    "duplicate dependency {} reached with different metadata, merged",
                    raw.artifact.id()
                );
            }
        }

        // Reversed so the leftmost child is visited first.
        stack.extend(raw.children.iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::tree::RawArtifact;

    fn art(artifact: &str, version: &str) -> RawArtifact {
        RawArtifact::new("org.example", artifact, version)
    }

    #[test]
    fn every_node_is_visited_once() {
        let tree = RawNode::included(
            art("root", "1.0"),
            vec![
                RawNode::included(art("a", "1.0"), vec![RawNode::included(art("a1", "1.0"), vec![])]),
                RawNode::included(art("b", "1.0"), vec![]),
            ],
        );
        let mut stats = BuildStats::default();
        let mut graph = ModuleGraph::new(tree.artifact.id());
        traverse(&mut graph, &tree, &mut stats);
        assert_eq!(stats.visited, 4);
        assert_eq!(stats.merged, 0);
    }

    #[test]
    fn divergent_duplicates_are_counted() {
        let tree = RawNode::included(
            art("root", "1.0"),
            vec![
                RawNode::included(art("shared", "1.0"), vec![RawNode::included(art("x", "1.0"), vec![])]),
                RawNode::included(art("shared", "1.0"), vec![]),
                RawNode::included(art("shared", "1.0"), vec![RawNode::included(art("y", "1.0"), vec![])]),
            ],
        );
        let mut builder = GraphBuilder::new();
        builder.add_tree(&tree).unwrap();
        let stats = builder.stats();
        assert_eq!(stats.visited, 6);
        assert_eq!(stats.merged, 2);
        assert_eq!(stats.divergent, 1);
    }
}
