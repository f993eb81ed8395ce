//! Command-line client for an ERC20Votes governance token.

pub mod commands;
pub mod config;
pub mod errors;
pub mod reporter;
pub mod router;

// Re-export commonly used types and functions
pub use commands::{Command, CommandKind};
pub use config::ClientConfig;
pub use errors::CliError;
pub use reporter::{ConfirmationReporter, Report};
pub use router::CommandRouter;
