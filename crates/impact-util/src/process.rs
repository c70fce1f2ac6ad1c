use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use crate::errors::ImpactError;

/// Builder for constructing and executing external processes.
///
/// Used to drive the build tool (`mvn`) and the platform URL opener.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// The program this builder will run.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execute the command, wait for it, and return its captured output.
    pub fn exec(&self) -> Result<Output, ImpactError> {
        self.command().output().map_err(ImpactError::from)
    }

    /// Start the command detached from our stdio without waiting for it.
    ///
    /// The raw `io::Error` is returned so callers can tell a missing program
    /// (`NotFound`) apart from other spawn failures.
    pub fn spawn_detached(&self) -> std::io::Result<Child> {
        self.command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}
