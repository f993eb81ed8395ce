//! Deploy command for the CLI.

use crate::reporter::{ConfirmationReporter, Report};
use govtoken_chain::{ChainError, GovernanceToken};
use tracing::info;

/// Runs the deploy command.
pub async fn run<T: GovernanceToken + ?Sized>(token: &T) -> Result<Report, ChainError> {
    info!("Deploying token contract from {:?}", token.signer());

    let pending = token.deploy().await?;
    ConfirmationReporter::new(token).deployed(pending).await
}
