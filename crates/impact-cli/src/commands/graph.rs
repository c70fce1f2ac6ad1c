//! Handler for `impact graph`.

use std::path::PathBuf;

use miette::Result;

use impact_ops::ops_graph::{self, GraphOptions};

pub async fn exec(
    project_dir: Option<PathBuf>,
    input: Option<PathBuf>,
    conflicts: bool,
    json: bool,
) -> Result<()> {
    let (source, project_dir) = super::resolve_source(project_dir, input)?;
    let opts = GraphOptions {
        source,
        project_dir,
        conflicts,
        json,
    };
    ops_graph::graph(&opts).await
}
