use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all impact operations.
///
/// Every fatal variant names the phase that failed so the build log shows
/// where the report pipeline stopped.
#[derive(Debug, Error, Diagnostic)]
pub enum ImpactError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid configuration (API key, endpoint URL, config file).
    #[error("Configuration error: {message}")]
    #[diagnostic(help(
        "Set the API key with --api-key, the UPDATEIMPACT_APIKEY environment variable, \
         or `api-key` under [submit] in ~/.updateimpact/config.toml"
    ))]
    Config { message: String },

    /// The build tool could not produce a dependency tree.
    #[error("Failed to build the dependency tree: {message}")]
    TreeBuild { message: String },

    /// The dependency tree output could not be parsed.
    #[error("Failed to parse the dependency tree at line {line}: {message}")]
    TreeParse { line: usize, message: String },

    /// Submitting the dependency report failed at the transport level.
    #[error("Failed to submit the dependency report: {message}")]
    Submission { message: String },

    /// The report link could not be opened in a browser.
    #[error("Failed to open the report in a browser: {message}")]
    Browser { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ImpactResult<T> = miette::Result<T>;
