//! Operation: open the report link in the user's browser.

use std::io::ErrorKind;

use impact_util::errors::{ImpactError, ImpactResult};
use impact_util::process::CommandBuilder;

/// Platform command that opens `url` in the default browser.
pub fn opener_command(url: &str) -> CommandBuilder {
    if cfg!(target_os = "macos") {
        CommandBuilder::new("open").arg(url)
    } else if cfg!(windows) {
        CommandBuilder::new("cmd").args(["/C", "start", ""]).arg(url)
    } else {
        CommandBuilder::new("xdg-open").arg(url)
    }
}

/// Whether a browser could be shown at all.
fn has_graphical_session() -> bool {
    if !cfg!(target_os = "linux") {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

/// Open `url` in a browser. A headless session is skipped quietly.
pub fn open_in_browser(url: &str) -> ImpactResult<()> {
    if !has_graphical_session() {
        tracing::debug!("no graphical session, not opening {url}");
        return Ok(());
    }
    launch(&opener_command(url))?;
    Ok(())
}

/// Start an opener command without waiting for it.
///
/// Returns `false` when the opener is not installed.
pub fn launch(cmd: &CommandBuilder) -> ImpactResult<bool> {
    match cmd.spawn_detached() {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("browser opener `{}` is not installed", cmd.program());
            Ok(false)
        }
        Err(e) => Err(ImpactError::Browser {
            message: format!("could not run `{}`: {e}", cmd.program()),
        }
        .into()),
    }
}
