//! CLI argument definitions for impact.
//!
//! Submission settings can also come from the environment (`UPDATEIMPACT_*`)
//! or `~/.updateimpact/config.toml`; flags win over both.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "impact",
    version,
    about = "Report Maven dependency graphs to UpdateImpact",
    long_about = "impact runs `mvn dependency:tree`, turns each module's tree into a \
                  deduplicated dependency graph with version conflicts and cycles marked, \
                  and submits the report to the UpdateImpact service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the dependency report and submit it
    Submit {
        /// Maven project directory (default: nearest directory with a pom.xml)
        #[arg(long)]
        project_dir: Option<PathBuf>,
        /// Read a captured dependency:tree output (or a .json tree) instead of running Maven
        #[arg(long)]
        input: Option<PathBuf>,
        /// UpdateImpact API key
        #[arg(long, env = "UPDATEIMPACT_APIKEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Base URL of the report service
        #[arg(long, env = "UPDATEIMPACT_URL")]
        url: Option<String>,
        /// Do not open the report in a browser
        #[arg(long)]
        no_browser: bool,
        /// Whether to open the report in a browser
        #[arg(
            long,
            env = "UPDATEIMPACT_OPENBROWSER",
            value_name = "BOOL",
            hide = true
        )]
        open_browser: Option<bool>,
        /// Also write the report JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Build the report without submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Build the dependency graphs locally and print them
    Graph {
        /// Maven project directory (default: nearest directory with a pom.xml)
        #[arg(long)]
        project_dir: Option<PathBuf>,
        /// Read a captured dependency:tree output (or a .json tree) instead of running Maven
        #[arg(long)]
        input: Option<PathBuf>,
        /// Show version conflicts and pruned cycles
        #[arg(long)]
        conflicts: bool,
        /// Print the report document as JSON
        #[arg(long, conflicts_with = "conflicts")]
        json: bool,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_browser_flag_is_accepted_with_open_browser_env() {
        std::env::set_var("UPDATEIMPACT_OPENBROWSER", "true");
        let parsed = Cli::try_parse_from(["impact", "submit", "--no-browser", "--dry-run"]);
        std::env::remove_var("UPDATEIMPACT_OPENBROWSER");

        let cli = parsed.unwrap();
        match cli.command {
            Command::Submit {
                no_browser,
                open_browser,
                ..
            } => {
                assert!(no_browser);
                assert_eq!(open_browser, Some(true));
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }
}
