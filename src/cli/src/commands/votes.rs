//! Voting power queries for the CLI.

use crate::reporter::Report;
use govtoken_chain::{ChainError, GovernanceToken};
use govtoken_core::{Address, BlockPointer};
use tracing::debug;

/// Runs the getVotes command.
pub async fn current<T: GovernanceToken + ?Sized>(token: &T, account: Address) -> Result<Report, ChainError> {
    let votes = token.get_votes(account).await?;
    debug!("Votes of {:?}: {} units", account, votes.units());

    Ok(Report::Votes { account, votes })
}

/// Runs the getPastVotes command.
///
/// The head is read once. Both the requested block and the present value
/// (one block below the head, which has no final checkpoint yet) are resolved
/// and bounded against that single reading.
pub async fn past<T: GovernanceToken + ?Sized>(
    token: &T,
    account: Address,
    at: BlockPointer,
) -> Result<Report, ChainError> {
    let latest_block = token.current_height().await?;
    let block = match at {
        BlockPointer::Number(block) => block,
        BlockPointer::Latest => latest_block.saturating_sub(1),
    };
    if block >= latest_block {
        return Err(ChainError::InvalidBlock {
            requested: block,
            current: latest_block,
        });
    }

    let votes = token.get_past_votes(account, BlockPointer::Number(block)).await?;
    let present = token
        .get_past_votes(account, BlockPointer::Number(latest_block - 1))
        .await?;
    debug!("Past votes of {:?} at {}: {} units", account, block, votes.units());

    Ok(Report::PastVotes {
        account,
        at,
        votes,
        latest_block,
        present,
    })
}
