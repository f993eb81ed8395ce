//! Delegate command for the CLI.

use crate::reporter::{ConfirmationReporter, Report};
use govtoken_chain::{ChainError, GovernanceToken};
use govtoken_core::Address;
use tracing::info;

/// Runs the delegate command.
///
/// The whole balance of the signer becomes the delegatee's voting power, so
/// the balance is read before submission and reported as the power moved.
pub async fn run<T: GovernanceToken + ?Sized>(token: &T, to: Address) -> Result<Report, ChainError> {
    let from = token.signer();
    let votes = token.balance_of(from).await?;
    info!("Delegating {} units of voting power from {:?} to {:?}", votes, from, to);

    let pending = token.delegate(to).await?;
    ConfirmationReporter::new(token).delegated(pending, from, to, votes).await
}
