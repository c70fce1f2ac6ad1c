//! Version conflict and cycle summary for a module graph.

use std::fmt;

use impact_core::artifact::ArtifactId;

use crate::graph::ModuleGraph;

/// Every evicted and cycle-pruned artifact of one module graph.
#[derive(Debug, Default)]
pub struct EvictionSummary {
    pub evictions: Vec<Eviction>,
    pub cycles: Vec<ArtifactId>,
}

/// An artifact version that lost a conflict.
#[derive(Debug, Clone)]
pub struct Eviction {
    pub id: ArtifactId,
    pub winner: String,
}

impl EvictionSummary {
    pub fn from_graph(graph: &ModuleGraph) -> Self {
        let evictions = graph
            .evictions()
            .filter_map(|n| {
                n.evicted_by_version().map(|winner| Eviction {
                    id: n.id().clone(),
                    winner: winner.to_string(),
                })
            })
            .collect();
        let cycles = graph.cycles().map(|n| n.id().clone()).collect();
        Self { evictions, cycles }
    }

    pub fn is_empty(&self) -> bool {
        self.evictions.is_empty() && self.cycles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.evictions.len() + self.cycles.len()
    }
}

impl fmt::Display for EvictionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No version conflicts.");
        }
        if !self.evictions.is_empty() {
            writeln!(f, "Version conflicts ({}):", self.evictions.len())?;
            for e in &self.evictions {
                writeln!(f, "  {e}")?;
            }
        }
        if !self.cycles.is_empty() {
            writeln!(f, "Cycles pruned ({}):", self.cycles.len())?;
            for id in &self.cycles {
                writeln!(f, "  {id}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Eviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requested {} but resolved {}",
            self.id.key(),
            self.id.version(),
            self.winner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DependencyNode;

    #[test]
    fn empty_summary() {
        let graph = ModuleGraph::new(ArtifactId::new("com.example", "app", "1.0", "jar", None));
        let summary = EvictionSummary::from_graph(&graph);
        assert!(summary.is_empty());
        assert_eq!(summary.len(), 0);
        assert_eq!(summary.to_string(), "No version conflicts.\n");
    }

    #[test]
    fn summary_lists_evictions_and_cycles() {
        let root = ArtifactId::new("com.example", "app", "1.0", "jar", None);
        let mut graph = ModuleGraph::new(root.clone());
        graph.insert_or_merge(
            DependencyNode::new(ArtifactId::new("org.b", "b", "2.0", "jar", None))
                .with_evicted_by("1.0"),
        );
        graph.insert_or_merge(DependencyNode::new(root).with_cycle());

        let summary = EvictionSummary::from_graph(&graph);
        assert_eq!(summary.len(), 2);
        let s = summary.to_string();
        assert!(s.contains("org.b:b requested 2.0 but resolved 1.0"));
        assert!(s.contains("Cycles pruned (1):"));
        assert!(s.contains("com.example:app:jar:1.0"));
    }
}
