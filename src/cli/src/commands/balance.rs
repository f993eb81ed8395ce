//! Balance command for the CLI.

use crate::reporter::Report;
use govtoken_chain::{ChainError, GovernanceToken};
use govtoken_core::Address;
use tracing::debug;

/// Runs the balance command.
pub async fn run<T: GovernanceToken + ?Sized>(token: &T, account: Address) -> Result<Report, ChainError> {
    let balance = token.balance_of(account).await?;
    debug!("Balance of {:?}: {} units", account, balance.units());

    Ok(Report::Balance { account, balance })
}
