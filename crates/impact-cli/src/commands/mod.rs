//! Command dispatch and handler modules.

mod graph;
mod submit;

use std::path::PathBuf;

use miette::Result;

use impact_ops::TreeSource;
use impact_util::errors::ImpactError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Submit {
            project_dir,
            input,
            api_key,
            url,
            no_browser,
            open_browser,
            output,
            dry_run,
        } => {
            submit::exec(
                project_dir,
                input,
                api_key,
                url,
                browser_choice(no_browser, open_browser),
                output,
                dry_run,
            )
            .await
        }
        Command::Graph {
            project_dir,
            input,
            conflicts,
            json,
        } => graph::exec(project_dir, input, conflicts, json).await,
    }
}

/// `--no-browser` wins over any `--open-browser` value, including one taken
/// from the environment.
fn browser_choice(no_browser: bool, open_browser: Option<bool>) -> Option<bool> {
    if no_browser {
        Some(false)
    } else {
        open_browser
    }
}

/// Work out the project directory and where its trees come from.
///
/// Without `--project-dir` the nearest ancestor holding a `pom.xml` is used.
/// Running Maven needs that POM; a captured `--input` does not.
fn resolve_source(
    project_dir: Option<PathBuf>,
    input: Option<PathBuf>,
) -> Result<(TreeSource, PathBuf)> {
    let cwd = std::env::current_dir().map_err(ImpactError::Io)?;
    let project_dir = match project_dir {
        Some(dir) => dir,
        None => impact_util::fs::find_ancestor_with(&cwd, "pom.xml").unwrap_or(cwd),
    };

    if let Some(path) = input {
        return Ok((TreeSource::File(path), project_dir));
    }
    if !project_dir.join("pom.xml").is_file() {
        return Err(ImpactError::TreeBuild {
            message: format!("no pom.xml found in {}", project_dir.display()),
        }
        .into());
    }
    Ok((
        TreeSource::Maven {
            project_dir: project_dir.clone(),
        },
        project_dir,
    ))
}
