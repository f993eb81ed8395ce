//! Typed access to the one deployed governance token.

use crate::bindings::GovTokenContract;
use crate::connection::{CallKind, ChainConnection, Confirmation, PendingCall};
use crate::errors::ChainError;
use async_trait::async_trait;
use ethers::{
    contract::ContractError,
    core::types::{transaction::eip2718::TypedTransaction, Bytes, TransactionRequest, U256},
    providers::Middleware,
};
use govtoken_core::{Address, BlockNumber, BlockPointer, TokenAmount};
use tracing::debug;

/// The remote operations the client performs against the token.
///
/// Every method is a single remote interaction; none retries.
#[async_trait]
pub trait GovernanceToken: Send + Sync {
    /// Address of the account that signs state-changing calls.
    fn signer(&self) -> Address;

    /// Latest block height known to the node.
    async fn current_height(&self) -> Result<BlockNumber, ChainError>;

    /// Broadcasts the creation of a new token contract.
    async fn deploy(&self) -> Result<PendingCall, ChainError>;

    async fn mint(&self, to: Address, amount: TokenAmount) -> Result<PendingCall, ChainError>;

    async fn delegate(&self, to: Address) -> Result<PendingCall, ChainError>;

    async fn transfer(&self, to: Address, amount: TokenAmount) -> Result<PendingCall, ChainError>;

    async fn balance_of(&self, who: Address) -> Result<TokenAmount, ChainError>;

    /// Voting power of `who` as of the latest block.
    async fn get_votes(&self, who: Address) -> Result<TokenAmount, ChainError>;

    /// Voting power of `who` at a block strictly below the current height.
    ///
    /// `Latest` resolves to the newest final block, one below the head.
    async fn get_past_votes(&self, who: Address, at: BlockPointer) -> Result<TokenAmount, ChainError>;

    /// Waits for a pending call to be included.
    async fn confirm(&self, pending: &PendingCall) -> Result<Confirmation, ChainError>;
}

/// Binds a [`ChainConnection`] to one token contract.
pub struct ContractProxy<M: Middleware> {
    /// The signing connection
    connection: ChainConnection<M>,
    /// The token contract
    contract: GovTokenContract<M>,
    /// Creation bytecode, only needed to deploy
    bytecode: Option<Bytes>,
}

impl<M: Middleware + 'static> ContractProxy<M> {
    /// Creates a proxy for the token at `address`.
    pub fn new(connection: ChainConnection<M>, address: Address) -> Result<Self, ChainError> {
        let contract = GovTokenContract::new(address, connection.client())?;

        Ok(Self {
            connection,
            contract,
            bytecode: None,
        })
    }

    /// Supplies the creation bytecode used by [`GovernanceToken::deploy`].
    pub fn with_bytecode(mut self, bytecode: Bytes) -> Self {
        self.bytecode = Some(bytecode);
        self
    }

    /// The token contract this proxy talks to.
    pub fn address(&self) -> Address {
        self.contract.address()
    }
}

fn read_error<M: Middleware>(method: &str, error: ContractError<M>) -> ChainError {
    ChainError::Connection(format!("Failed to call {}: {}", method, error))
}

#[async_trait]
impl<M: Middleware + 'static> GovernanceToken for ContractProxy<M> {
    fn signer(&self) -> Address {
        self.connection.address()
    }

    async fn current_height(&self) -> Result<BlockNumber, ChainError> {
        self.connection.current_height().await
    }

    async fn deploy(&self) -> Result<PendingCall, ChainError> {
        let bytecode = self.bytecode.clone().ok_or_else(|| {
            ChainError::Artifact("No creation bytecode loaded for deployment".to_string())
        })?;

        let tx: TypedTransaction = TransactionRequest::new().data(bytecode).into();
        self.connection.submit(CallKind::Deploy, tx).await
    }

    async fn mint(&self, to: Address, amount: TokenAmount) -> Result<PendingCall, ChainError> {
        let call = self.contract.mint(to, amount.units())?;
        self.connection.submit(CallKind::Mint, call.tx).await
    }

    async fn delegate(&self, to: Address) -> Result<PendingCall, ChainError> {
        let call = self.contract.delegate(to)?;
        self.connection.submit(CallKind::Delegate, call.tx).await
    }

    async fn transfer(&self, to: Address, amount: TokenAmount) -> Result<PendingCall, ChainError> {
        let call = self.contract.transfer(to, amount.units())?;
        self.connection.submit(CallKind::Transfer, call.tx).await
    }

    async fn balance_of(&self, who: Address) -> Result<TokenAmount, ChainError> {
        let balance = self
            .contract
            .balance_of(who)?
            .call()
            .await
            .map_err(|e| read_error("balanceOf", e))?;

        Ok(TokenAmount::from(balance))
    }

    async fn get_votes(&self, who: Address) -> Result<TokenAmount, ChainError> {
        let votes = self
            .contract
            .get_votes(who)?
            .call()
            .await
            .map_err(|e| read_error("getVotes", e))?;

        Ok(TokenAmount::from(votes))
    }

    async fn get_past_votes(&self, who: Address, at: BlockPointer) -> Result<TokenAmount, ChainError> {
        let current = self.connection.current_height().await?;
        let block = match at {
            BlockPointer::Number(block) => block,
            BlockPointer::Latest => current.saturating_sub(1),
        };

        // Checkpoints only exist for blocks that are already final
        if block >= current {
            return Err(ChainError::InvalidBlock {
                requested: block,
                current,
            });
        }
        debug!("Reading past votes at block {} (head {})", block, current);

        let votes = self
            .contract
            .get_past_votes(who, U256::from(block))?
            .call()
            .await
            .map_err(|e| read_error("getPastVotes", e))?;

        Ok(TokenAmount::from(votes))
    }

    async fn confirm(&self, pending: &PendingCall) -> Result<Confirmation, ChainError> {
        let receipt = self.connection.wait(pending).await?;
        Ok(Confirmation::from(&receipt))
    }
}
