//! Operation: build the dependency report of a project and submit it.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use impact_core::config::Settings;
use impact_graph::assembler::{assemble, BuildId, ModuleEntry, ReportAccumulator};
use impact_graph::builder::build_module_graph;
use impact_graph::eviction::EvictionSummary;
use impact_graph::report::Report;
use impact_maven::tree_text::ModuleTree;
use impact_util::errors::{ImpactError, ImpactResult};
use impact_util::progress::{status, status_info, status_warn};

use crate::ops_browse::open_in_browser;
use crate::ops_submit::ReportSender;
use crate::{execution_root_name, load_module_trees, TreeSource};

/// Options for `impact submit`.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub source: TreeSource,
    /// Directory whose `pom.xml` names the execution-root module.
    pub project_dir: PathBuf,
    /// Also write the JSON document here.
    pub output: Option<PathBuf>,
    /// Build and serialize only; no submission, no browser.
    pub dry_run: bool,
}

/// Build every module graph concurrently and assemble the report.
///
/// Each module is processed on a blocking task and pushed at its reactor
/// position; the push that completes the set yields the entries.
pub async fn build_report(
    modules: Vec<ModuleTree>,
    execution_root: Option<&str>,
    build_id: &BuildId,
) -> ImpactResult<Report> {
    let current_module = match modules.last() {
        Some(m) => m.name.clone(),
        None => {
            return Err(ImpactError::TreeBuild {
                message: "no modules to report".to_string(),
            }
            .into())
        }
    };

    let accumulator = Arc::new(ReportAccumulator::new(modules.len()));
    let mut join_set = JoinSet::new();

    for (index, module) in modules.into_iter().enumerate() {
        let acc = accumulator.clone();
        let is_root = execution_root == Some(module.name.as_str());
        join_set.spawn_blocking(move || {
            let graph = build_module_graph(&module.tree);
            let entry = ModuleEntry::new(module.name, graph).with_execution_root(is_root);
            acc.push_at(index, entry)
        });
    }

    let mut completed: Option<Vec<ModuleEntry>> = None;
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(Some(entries))) => completed = Some(entries),
            Ok(Ok(None)) => {}
            Ok(Err(e)) => return Err(e),
            Err(e) => return Err(miette::miette!("Background task failed: {}", e)),
        }
    }

    let entries = completed.ok_or_else(|| ImpactError::Generic {
        message: "module graphs did not complete the report".to_string(),
    })?;
    Ok(assemble(entries, &current_module, build_id))
}

/// Run the whole pipeline for `impact submit` with already resolved settings.
///
/// Returns the viewer link when the report was accepted.
pub async fn run(opts: &ReportOptions, settings: &Settings) -> ImpactResult<Option<String>> {
    let source = opts.source.clone();
    let modules = tokio::task::spawn_blocking(move || load_module_trees(&source))
        .await
        .map_err(|e| miette::miette!("Background task failed: {}", e))??;
    status("Building", &format!("dependency graphs for {} module(s)", modules.len()));

    let root_name = execution_root_name(&opts.project_dir);
    let build_id = BuildId::generate();
    let report = build_report(modules, root_name.as_deref(), &build_id).await?;

    for module in &report.modules {
        let summary = EvictionSummary::from_graph(&module.graph);
        if !summary.is_empty() {
            tracing::info!("{}: {}", module.name, summary.to_string().trim_end());
        }
    }

    if let Some(ref path) = opts.output {
        let json = report.to_json_pretty(&settings.api_key)?;
        impact_util::fs::write_creating_parents(path, json.as_bytes()).map_err(ImpactError::Io)?;
        status_info("Wrote", &path.display().to_string());
    }

    if opts.dry_run {
        status_info(
            "Skipped",
            &format!("submission of {} (dry run)", report.project_name),
        );
        return Ok(None);
    }

    let document = report.to_json(&settings.api_key)?;
    let sender = ReportSender::new(&settings.url)?;
    status(
        "Submitting",
        &format!(
            "{} ({} nodes) to {}",
            report.project_name,
            report.node_count(),
            sender.submit_url()
        ),
    );

    let link = sender.submit(document).await?;
    match link {
        Some(ref link) => {
            status("Submitted", link);
            println!("{link}");
            if settings.open_browser {
                open_in_browser(link)?;
            }
        }
        None => status_warn("Rejected", "the report service did not accept the report"),
    }
    Ok(link)
}
