pub mod ops_browse;
pub mod ops_graph;
pub mod ops_report;
pub mod ops_submit;

use std::path::{Path, PathBuf};

use impact_core::tree::RawNode;
use impact_maven::invoke::TreeInvocation;
use impact_maven::pom;
use impact_maven::tree_text::{self, ModuleTree};
use impact_util::errors::{ImpactError, ImpactResult};
use serde::Deserialize;

/// Where the raw dependency trees of a build come from.
#[derive(Debug, Clone)]
pub enum TreeSource {
    /// Run `mvn dependency:tree` in the project directory.
    Maven { project_dir: PathBuf },
    /// A captured `dependency:tree` output, or a JSON tree (`.json`).
    File(PathBuf),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTrees {
    One(RawNode),
    Many(Vec<RawNode>),
}

/// Obtain the raw tree of every module, in reactor order.
///
/// Blocks while Maven runs.
pub fn load_module_trees(source: &TreeSource) -> ImpactResult<Vec<ModuleTree>> {
    let modules = match source {
        TreeSource::Maven { project_dir } => {
            let output = TreeInvocation::new(project_dir).run()?;
            tree_text::parse_tree_output(&output)?
        }
        TreeSource::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| ImpactError::TreeBuild {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
            if path.extension().is_some_and(|ext| ext == "json") {
                parse_json_trees(&content)?
            } else {
                tree_text::parse_tree_output(&content)?
            }
        }
    };

    if modules.is_empty() {
        return Err(ImpactError::TreeBuild {
            message: "no dependency tree found in the build output".to_string(),
        }
        .into());
    }
    Ok(modules)
}

fn parse_json_trees(content: &str) -> ImpactResult<Vec<ModuleTree>> {
    let trees: JsonTrees = serde_json::from_str(content).map_err(|e| ImpactError::TreeParse {
        line: e.line(),
        message: e.to_string(),
    })?;
    let trees = match trees {
        JsonTrees::One(tree) => vec![tree],
        JsonTrees::Many(trees) => trees,
    };
    Ok(trees
        .into_iter()
        .map(|tree| ModuleTree {
            name: tree.artifact.artifact_id.clone(),
            tree,
        })
        .collect())
}

/// Name of the module the build was invoked on: the `artifactId` of the
/// project directory's `pom.xml`.
pub fn execution_root_name(project_dir: &Path) -> Option<String> {
    match pom::read_project_pom(project_dir) {
        Ok(pom) => pom.artifact_id,
        Err(e) => {
            tracing::debug!("no execution root from {}: {e}", project_dir.display());
            None
        }
    }
}
