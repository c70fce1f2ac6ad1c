//! Raw dependency tree as produced by the build tool.
//!
//! A raw tree is a plain ownership tree: the same artifact can appear many
//! times, once per path that reaches it. Nodes that lost a version conflict
//! or closed a cycle are kept with a [`NodeState`] saying so.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactId;

/// Artifact descriptor attached to a raw tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default = "default_packaging")]
    pub packaging: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_packaging() -> String {
    "jar".to_string()
}

impl RawArtifact {
    /// Descriptor with `jar` packaging and no classifier or scope.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: default_packaging(),
            classifier: None,
            scope: None,
        }
    }

    /// Parse a Maven tree coordinate.
    ///
    /// Accepts `group:artifact:type:version` (a module root),
    /// `group:artifact:type:version:scope`, and
    /// `group:artifact:type:classifier:version:scope`.
    ///
    /// Five parts are always read as version then scope. A classified root
    /// written `group:artifact:type:classifier:version` is not recognized and
    /// parses with its classifier as the version.
    pub fn parse_coordinate(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        let (classifier, version, scope) = match parts.len() {
            4 => (None, parts[3], None),
            5 => (None, parts[3], Some(parts[4])),
            6 => (Some(parts[3]), parts[4], Some(parts[5])),
            _ => return None,
        };
        Some(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: version.to_string(),
            packaging: parts[2].to_string(),
            classifier: classifier.map(str::to_string),
            scope: scope.map(str::to_string),
        })
    }

    /// Normalized identity of this artifact.
    pub fn id(&self) -> ArtifactId {
        ArtifactId::new(
            &self.group_id,
            &self.artifact_id,
            &self.version,
            &self.packaging,
            self.classifier.as_deref(),
        )
    }
}

/// Resolution state of a raw tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    #[default]
    Included,
    /// Lost a version conflict; the winning version is on the related artifact.
    OmittedForConflict,
    /// Pruned because it closed a dependency cycle.
    OmittedForCycle,
}

/// One node of a raw dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub artifact: RawArtifact,
    #[serde(default)]
    pub state: NodeState,
    /// The artifact that won the conflict, set for [`NodeState::OmittedForConflict`].
    #[serde(default)]
    pub related: Option<RawArtifact>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// An included node with the given children.
    pub fn included(artifact: RawArtifact, children: Vec<RawNode>) -> Self {
        Self {
            artifact,
            state: NodeState::Included,
            related: None,
            children,
        }
    }

    /// A node evicted in favour of `winner`.
    pub fn evicted(artifact: RawArtifact, winner: RawArtifact) -> Self {
        Self {
            artifact,
            state: NodeState::OmittedForConflict,
            related: Some(winner),
            children: Vec::new(),
        }
    }

    /// A node pruned because it closes a cycle.
    pub fn cycle(artifact: RawArtifact) -> Self {
        Self {
            artifact,
            state: NodeState::OmittedForCycle,
            related: None,
            children: Vec::new(),
        }
    }

    /// Version that evicted this node, if it lost a conflict.
    pub fn evicting_version(&self) -> Option<&str> {
        match self.state {
            NodeState::OmittedForConflict => self.related.as_ref().map(|r| r.version.as_str()),
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }
}
