//! Interactive terminal front end.
//!
//! [`Session`] drives the menu loop over an [`HrService`](crate::service::HrService),
//! reading lines from a [`Prompter`] and writing to any [`std::io::Write`].

mod prompt;
mod session;

pub use prompt::{LineEditor, Prompter, ScriptedPrompter};
pub use session::Session;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::error::HrError;

/// Failures of the interactive front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// An operation on the records was rejected.
    #[error(transparent)]
    Hr(#[from] HrError),

    /// Input could not be understood.
    #[error("Invalid input '{input}': expected {expected}")]
    InvalidInput {
        /// What the user typed.
        input: String,
        /// What was expected instead.
        expected: String,
    },

    /// The input stream ended in the middle of a prompt.
    #[error("Input ended")]
    EndOfInput,

    /// The line editor failed.
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),

    /// Writing to the output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    TracingInit(String),
}

impl CliError {
    pub(crate) fn invalid_input(input: &str, expected: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            expected: expected.into(),
        }
    }

    /// Returns true for errors the menu reports before carrying on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CliError::Hr(_) | CliError::InvalidInput { .. })
    }
}

/// Installs the global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the flags. Without either, only
/// warnings are shown so log lines do not interleave with the menu.
pub fn init_tracing(verbose: bool, quiet: bool) -> Result<(), CliError> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::TracingInit(e.to_string()))
}
