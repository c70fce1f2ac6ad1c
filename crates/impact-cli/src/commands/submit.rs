//! Handler for `impact submit`.

use std::path::PathBuf;

use miette::Result;

use impact_core::config::{GlobalConfig, Settings, SettingsOverrides};
use impact_ops::ops_report::{self, ReportOptions};

#[allow(clippy::too_many_arguments)]
pub async fn exec(
    project_dir: Option<PathBuf>,
    input: Option<PathBuf>,
    api_key: Option<String>,
    url: Option<String>,
    open_browser: Option<bool>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    // Configuration problems surface before Maven is run.
    let config = GlobalConfig::load()?;
    let overrides = SettingsOverrides {
        api_key,
        url,
        open_browser,
    };
    let settings = Settings::resolve(overrides, &config)?;

    let (source, project_dir) = super::resolve_source(project_dir, input)?;
    let opts = ReportOptions {
        source,
        project_dir,
        output,
        dry_run,
    };

    ops_report::run(&opts, &settings).await?;
    Ok(())
}
