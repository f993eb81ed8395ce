//! Routes a command line to one contract operation.
//!
//! Routing has two steps: [`Command::parse`] validates everything offline,
//! then [`CommandRouter::dispatch`] performs the remote calls. Nothing touches
//! the network until the first step succeeded.

use crate::commands::{balance, delegate, deploy, mint, transfer, votes, Command};
use crate::errors::CliError;
use crate::reporter::Report;
use govtoken_chain::GovernanceToken;
use tracing::debug;

/// Dispatches validated commands against one token.
pub struct CommandRouter<'a, T: ?Sized> {
    token: &'a T,
}

impl<'a, T: GovernanceToken + ?Sized> CommandRouter<'a, T> {
    pub fn new(token: &'a T) -> Self {
        Self { token }
    }

    /// Parses and dispatches in one go.
    pub async fn route<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Result<Report, CliError> {
        let command = Command::parse(name, args)?;
        self.dispatch(&command).await
    }

    /// Runs a validated command. Each contract operation is invoked once.
    pub async fn dispatch(&self, command: &Command) -> Result<Report, CliError> {
        debug!("Dispatching {}", command);

        let token = self.token;
        let result = match *command {
            Command::DeployToken => deploy::run(token).await,
            Command::Mint { to, amount } => mint::run(token, to, amount).await,
            Command::Delegate { to } => delegate::run(token, to).await,
            Command::Transfer { to, amount } => transfer::run(token, to, amount).await,
            Command::BalanceOf { account } => balance::run(token, account).await,
            Command::GetVotes { account } => votes::current(token, account).await,
            Command::GetPastVotes { account, block } => votes::past(token, account, block).await,
        };

        result.map_err(|source| CliError::Chain {
            invocation: command.to_string(),
            source,
        })
    }
}
