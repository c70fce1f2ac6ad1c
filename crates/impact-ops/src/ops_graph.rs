//! Operation: build module graphs locally and print them.

use std::fmt::Write as _;
use std::path::PathBuf;

use impact_graph::assembler::BuildId;
use impact_graph::eviction::EvictionSummary;
use impact_graph::report::Report;

use crate::ops_report::build_report;
use crate::{execution_root_name, load_module_trees, TreeSource};

/// Options for `impact graph`.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub source: TreeSource,
    pub project_dir: PathBuf,
    /// Show version conflicts and pruned cycles.
    pub conflicts: bool,
    /// Print the report document as JSON.
    pub json: bool,
}

/// One line per module: name, root artifact, node and conflict counts.
pub fn module_summary(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} modules)", report.project_name, report.modules.len());
    for module in &report.modules {
        let evicted = module.graph.evictions().count();
        let marker = if module.execution_root { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {}{marker}: {} [{} nodes, {} evicted]",
            module.name,
            module.graph.root(),
            module.graph.len(),
            evicted
        );
    }
    out
}

/// Eviction summary of every module, under a heading per module.
pub fn conflict_report(report: &Report) -> String {
    let mut out = String::new();
    for module in &report.modules {
        let _ = writeln!(out, "{}:", module.name);
        let _ = write!(out, "{}", EvictionSummary::from_graph(&module.graph));
    }
    out
}

/// Build the graphs of the project and print the requested view.
pub async fn graph(opts: &GraphOptions) -> miette::Result<()> {
    let source = opts.source.clone();
    let modules = tokio::task::spawn_blocking(move || load_module_trees(&source))
        .await
        .map_err(|e| miette::miette!("Background task failed: {}", e))??;

    let root_name = execution_root_name(&opts.project_dir);
    let report = build_report(modules, root_name.as_deref(), &BuildId::generate()).await?;

    if opts.json {
        println!("{}", report.to_json_pretty("")?);
    } else if opts.conflicts {
        print!("{}", conflict_report(&report));
    } else {
        print!("{}", module_summary(&report));
    }
    Ok(())
}
