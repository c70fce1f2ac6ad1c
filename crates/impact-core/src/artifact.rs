//! Canonical artifact identity.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of one versioned artifact: group, name, version, packaging and
/// classifier.
///
/// Equality, ordering and hashing use exactly these five fields. An absent
/// classifier is stored as the empty string so `None` and `Some("")` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactId {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(rename = "type")]
    packaging: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "classifier_or_empty"
    )]
    classifier: String,
}

impl ArtifactId {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
        classifier: Option<&str>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
            classifier: classifier.unwrap_or_default().to_string(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// The classifier, or `None` when the artifact has none.
    pub fn classifier(&self) -> Option<&str> {
        if self.classifier.is_empty() {
            None
        } else {
            Some(&self.classifier)
        }
    }

    /// `group:artifact` key (without version), as used for conflict grouping.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// Maven coordinate form: `group:artifact:type[:classifier]:version`.
impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.packaging)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}

fn classifier_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
