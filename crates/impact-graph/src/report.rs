//! The dependency report and its wire shape.

use impact_core::artifact::ArtifactId;
use impact_util::errors::{ImpactError, ImpactResult};
use serde::Serialize;

use crate::assembler::{BuildId, ModuleEntry};
use crate::node::DependencyNode;

/// Version of the document layout produced by [`Report::to_json`].
pub const FORMAT_VERSION: &str = "1.0";

/// Producer tag stamped on every report: `impact/<version>`.
pub fn producer() -> String {
    format!("impact/{}", env!("CARGO_PKG_VERSION"))
}

/// All module graphs of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub project_name: String,
    pub build_id: BuildId,
    pub modules: Vec<ModuleEntry>,
    pub format_version: String,
    pub producer: String,
}

impl Report {
    /// Pair the report with the API key for serialization.
    pub fn document<'a>(&'a self, api_key: &'a str) -> ReportDocument<'a> {
        ReportDocument {
            project_name: &self.project_name,
            apikey: api_key,
            build_id: &self.build_id,
            modules: self
                .modules
                .iter()
                .map(|m| ModuleDocument {
                    module_name: &m.name,
                    module_id: m.graph.root(),
                    dependencies: m.graph.iter().collect(),
                })
                .collect(),
            format_version: &self.format_version,
            producer: &self.producer,
        }
    }

    /// Serialize the submission document as compact JSON.
    pub fn to_json(&self, api_key: &str) -> ImpactResult<String> {
        serde_json::to_string(&self.document(api_key)).map_err(|e| {
            ImpactError::Generic {
                message: format!("Failed to serialize the dependency report: {e}"),
            }
            .into()
        })
    }

    /// Serialize the submission document as indented JSON.
    pub fn to_json_pretty(&self, api_key: &str) -> ImpactResult<String> {
        serde_json::to_string_pretty(&self.document(api_key)).map_err(|e| {
            ImpactError::Generic {
                message: format!("Failed to serialize the dependency report: {e}"),
            }
            .into()
        })
    }

    /// Total number of dependency nodes across all modules.
    pub fn node_count(&self) -> usize {
        self.modules.iter().map(|m| m.graph.len()).sum()
    }
}

/// The document sent to the report service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument<'a> {
    project_name: &'a str,
    apikey: &'a str,
    build_id: &'a BuildId,
    modules: Vec<ModuleDocument<'a>>,
    format_version: &'a str,
    producer: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleDocument<'a> {
    module_name: &'a str,
    module_id: &'a ArtifactId,
    dependencies: Vec<&'a DependencyNode>,
}
