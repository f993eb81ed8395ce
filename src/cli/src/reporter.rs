//! Confirmation of state-changing calls and rendering of command results.

use ethers::types::TxHash;
use govtoken_chain::{ChainError, Confirmation, GovernanceToken, PendingCall};
use govtoken_core::{format_address, Address, BlockNumber, BlockPointer, TokenAmount};
use std::fmt;
use tracing::info;

/// The outcome of one command, ready to print.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Deployed {
        tx_hash: TxHash,
        block: Option<BlockNumber>,
        address: Address,
    },
    Minted {
        tx_hash: TxHash,
        block: Option<BlockNumber>,
        to: Address,
        amount: TokenAmount,
        /// Balance of `to` after the mint
        balance: TokenAmount,
    },
    Delegated {
        tx_hash: TxHash,
        block: Option<BlockNumber>,
        from: Address,
        to: Address,
        /// Voting power moved, read before submission
        votes: TokenAmount,
    },
    Transferred {
        tx_hash: TxHash,
        block: Option<BlockNumber>,
        from: Address,
        to: Address,
        amount: TokenAmount,
        /// Balance of `to` after the transfer
        balance: TokenAmount,
    },
    Balance {
        account: Address,
        balance: TokenAmount,
    },
    Votes {
        account: Address,
        votes: TokenAmount,
    },
    PastVotes {
        account: Address,
        at: BlockPointer,
        votes: TokenAmount,
        latest_block: BlockNumber,
        /// Voting power one block below `latest_block`
        present: TokenAmount,
    },
}

fn write_inclusion(f: &mut fmt::Formatter<'_>, tx_hash: &TxHash, block: &Option<BlockNumber>) -> fmt::Result {
    match block {
        Some(block) => write!(f, "\nTx hash: {:?} (block {})", tx_hash, block),
        None => write!(f, "\nTx hash: {:?}", tx_hash),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Deployed { tx_hash, block, address } => {
                write!(f, "Token contract deployed at {}", format_address(address))?;
                write_inclusion(f, tx_hash, block)
            }
            Report::Minted { tx_hash, block, to, amount, balance } => {
                let to = format_address(to);
                write!(f, "Minted {} tokens to account {}", amount, to)?;
                write!(f, "\nAccount {} has {} tokens", to, balance)?;
                write_inclusion(f, tx_hash, block)
            }
            Report::Delegated { tx_hash, block, from, to, votes } => {
                write!(
                    f,
                    "Account {} delegated {} units of voting power to {}",
                    format_address(from),
                    votes,
                    format_address(to)
                )?;
                write_inclusion(f, tx_hash, block)
            }
            Report::Transferred { tx_hash, block, from, to, amount, balance } => {
                let to = format_address(to);
                write!(f, "Account {} transferred {} tokens to {}", format_address(from), amount, to)?;
                write!(f, "\nAccount {} has {} tokens", to, balance)?;
                write_inclusion(f, tx_hash, block)
            }
            Report::Balance { account, balance } => {
                write!(f, "Account {} has {} tokens", format_address(account), balance)
            }
            Report::Votes { account, votes } => {
                write!(f, "Account {} has {} units of voting power", format_address(account), votes)
            }
            Report::PastVotes { account, at, votes, latest_block, present } => {
                let account = format_address(account);
                writeln!(f, "Account {} had {} units of voting power at block {}", account, votes, at)?;
                write!(
                    f,
                    "Account {} has {} units of voting power at latest block {}",
                    account, present, latest_block
                )
            }
        }
    }
}

/// Waits for pending calls and gathers the context an operator needs.
pub struct ConfirmationReporter<'a, T: ?Sized> {
    token: &'a T,
}

impl<'a, T: GovernanceToken + ?Sized> ConfirmationReporter<'a, T> {
    pub fn new(token: &'a T) -> Self {
        Self { token }
    }

    async fn confirm(&self, pending: &PendingCall) -> Result<Confirmation, ChainError> {
        info!("Waiting for {} transaction {:?}", pending.call, pending.tx_hash);
        self.token.confirm(pending).await
    }

    /// Confirms a deployment and reports the new contract address.
    pub async fn deployed(&self, pending: PendingCall) -> Result<Report, ChainError> {
        let confirmation = self.confirm(&pending).await?;
        let address = confirmation.contract_address.ok_or_else(|| ChainError::UnexpectedReceipt {
            tx_hash: confirmation.tx_hash,
            reason: "deployment receipt has no contract address".to_string(),
        })?;

        Ok(Report::Deployed {
            tx_hash: confirmation.tx_hash,
            block: confirmation.block_number,
            address,
        })
    }

    /// Confirms a mint and reads the recipient's new balance.
    pub async fn minted(&self, pending: PendingCall, to: Address, amount: TokenAmount) -> Result<Report, ChainError> {
        let confirmation = self.confirm(&pending).await?;
        let balance = self.token.balance_of(to).await?;

        Ok(Report::Minted {
            tx_hash: confirmation.tx_hash,
            block: confirmation.block_number,
            to,
            amount,
            balance,
        })
    }

    /// Confirms a delegation. `votes` is the power read before submission.
    pub async fn delegated(
        &self,
        pending: PendingCall,
        from: Address,
        to: Address,
        votes: TokenAmount,
    ) -> Result<Report, ChainError> {
        let confirmation = self.confirm(&pending).await?;

        Ok(Report::Delegated {
            tx_hash: confirmation.tx_hash,
            block: confirmation.block_number,
            from,
            to,
            votes,
        })
    }

    /// Confirms a transfer and reads the recipient's new balance.
    pub async fn transferred(
        &self,
        pending: PendingCall,
        from: Address,
        to: Address,
        amount: TokenAmount,
    ) -> Result<Report, ChainError> {
        let confirmation = self.confirm(&pending).await?;
        let balance = self.token.balance_of(to).await?;

        Ok(Report::Transferred {
            tx_hash: confirmation.tx_hash,
            block: confirmation.block_number,
            from,
            to,
            amount,
            balance,
        })
    }
}
