//! Transfer command for the CLI.

use crate::reporter::{ConfirmationReporter, Report};
use govtoken_chain::{ChainError, GovernanceToken};
use govtoken_core::{Address, TokenAmount};
use tracing::info;

/// Runs the transfer command.
pub async fn run<T: GovernanceToken + ?Sized>(
    token: &T,
    to: Address,
    amount: TokenAmount,
) -> Result<Report, ChainError> {
    let from = token.signer();
    info!("Transferring {} tokens from {:?} to {:?}", amount, from, to);

    let pending = token.transfer(to, amount).await?;
    ConfirmationReporter::new(token).transferred(pending, from, to, amount).await
}
