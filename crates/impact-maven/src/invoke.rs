//! Running `mvn dependency:tree` for a project directory.

use std::path::{Path, PathBuf};

use impact_util::errors::{ImpactError, ImpactResult};
use impact_util::process::CommandBuilder;
use impact_util::progress::spinner;

/// Arguments that produce the verbose compile-scope tree.
pub const TREE_ARGS: [&str; 4] = ["-B", "dependency:tree", "-Dverbose", "-Dscope=compile"];

/// Maximum number of `[ERROR]` lines quoted in a failure message.
const MAX_ERROR_LINES: usize = 10;

/// Platform name of the Maven launcher.
pub fn default_program() -> &'static str {
    if cfg!(windows) {
        "mvn.cmd"
    } else {
        "mvn"
    }
}

/// A `dependency:tree` run in one project directory.
#[derive(Debug, Clone)]
pub struct TreeInvocation {
    program: String,
    project_dir: PathBuf,
    extra_args: Vec<String>,
}

impl TreeInvocation {
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            program: default_program().to_string(),
            project_dir: project_dir.as_ref().to_path_buf(),
            extra_args: Vec::new(),
        }
    }

    /// Use another launcher, such as a Maven wrapper script.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.program)
            .args(TREE_ARGS)
            .args(self.extra_args.iter().cloned())
            .cwd(&self.project_dir)
    }

    /// Run Maven and return its standard output.
    pub fn run(&self) -> ImpactResult<String> {
        tracing::debug!(
            program = %self.program,
            dir = %self.project_dir.display(),
            "running dependency:tree"
        );
        let sp = spinner("Resolving the Maven dependency tree...");
        let result = self.command().exec();
        sp.finish_and_clear();

        let output = result.map_err(|e| ImpactError::TreeBuild {
            message: format!("could not run `{}`: {e}", self.program),
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ImpactError::TreeBuild {
                message: format!(
                    "`{}` exited with {}\n{}",
                    self.program,
                    output.status,
                    failure_excerpt(&stdout, &stderr)
                ),
            }
            .into());
        }

        Ok(stdout)
    }
}

/// The `[ERROR]` lines of a failed build, or the tail of stderr.
fn failure_excerpt(stdout: &str, stderr: &str) -> String {
    let errors: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with("[ERROR]"))
        .take(MAX_ERROR_LINES)
        .collect();
    if !errors.is_empty() {
        return errors.join("\n");
    }
    let tail: Vec<&str> = stderr.lines().rev().take(MAX_ERROR_LINES).collect();
    tail.into_iter().rev().collect::<Vec<_>>().join("\n")
}
