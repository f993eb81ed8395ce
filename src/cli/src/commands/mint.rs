//! Mint command for the CLI.

use crate::reporter::{ConfirmationReporter, Report};
use govtoken_chain::{ChainError, GovernanceToken};
use govtoken_core::{Address, TokenAmount};
use tracing::info;

/// Runs the mint command.
pub async fn run<T: GovernanceToken + ?Sized>(
    token: &T,
    to: Address,
    amount: TokenAmount,
) -> Result<Report, ChainError> {
    info!("Minting {} tokens ({} units) to {:?}", amount, amount.units(), to);

    let pending = token.mint(to, amount).await?;
    ConfirmationReporter::new(token).minted(pending, to, amount).await
}
