//! Error types for the CLI.

use govtoken_chain::ChainError;
use govtoken_core::CoreError;
use thiserror::Error;

/// Errors that can occur while routing and running a command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error when the command name is not in the command table.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Error when a command receives the wrong number of arguments.
    #[error("'{command}' expects {expected} argument(s), got {actual} (usage: {usage})")]
    Arity {
        /// The command name
        command: &'static str,
        /// Required number of arguments
        expected: usize,
        /// Supplied number of arguments
        actual: usize,
        /// Usage line for the command
        usage: String,
    },

    /// Error when an argument fails validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Error when the node or the contract fails the command.
    #[error("'{invocation}' failed")]
    Chain {
        /// The command line that failed
        invocation: String,
        /// The underlying failure
        #[source]
        source: ChainError,
    },
}
