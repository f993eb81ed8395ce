//! A signing connection to one Ethereum node.

use crate::errors::ChainError;
use ethers::{
    core::types::{transaction::eip2718::TypedTransaction, TransactionReceipt, TxHash, U64},
    middleware::SignerMiddleware,
    providers::{Http, JsonRpcClient, Middleware, MiddlewareError, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
};
use govtoken_core::{Address, BlockNumber};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// The middleware stack used against a real node.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// The state-changing calls the client submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    Deploy,
    Mint,
    Delegate,
    Transfer,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallKind::Deploy => "deploy",
            CallKind::Mint => "mint",
            CallKind::Delegate => "delegate",
            CallKind::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// A broadcast transaction whose outcome has not been observed yet.
///
/// Dropping it does not cancel anything: the transaction may still be mined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingCall {
    /// What was submitted
    pub call: CallKind,
    /// Hash of the broadcast transaction
    pub tx_hash: TxHash,
}

/// The on-chain outcome of a successful call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Confirmation {
    /// Hash of the included transaction
    pub tx_hash: TxHash,
    /// Block the transaction was included in
    pub block_number: Option<BlockNumber>,
    /// Address of the created contract, for deployments
    pub contract_address: Option<Address>,
}

impl From<&TransactionReceipt> for Confirmation {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|n| n.as_u64()),
            contract_address: receipt.contract_address,
        }
    }
}

/// Holds one provider and one signing key for the lifetime of a process.
pub struct ChainConnection<M: Middleware> {
    /// The signing middleware
    client: Arc<M>,
    /// Address derived from the signing key
    address: Address,
    /// Blocks to wait for after inclusion
    confirmations: usize,
}

impl ChainConnection<SignerClient> {
    /// Connects to an HTTP JSON-RPC endpoint.
    pub async fn connect(
        rpc_url: &str,
        private_key: &str,
        chain_id: Option<u64>,
        confirmations: usize,
    ) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            ChainError::Connection(format!("Failed to create provider for {}: {}", rpc_url, e))
        })?;

        Self::with_provider(provider, private_key, chain_id, confirmations).await
    }
}

impl<P: JsonRpcClient + 'static> ChainConnection<SignerMiddleware<Provider<P>, LocalWallet>> {
    /// Wraps an existing provider with a local signing key.
    ///
    /// Without a configured chain id the node is asked for one, which is the
    /// first network access of the connection.
    pub async fn with_provider(
        provider: Provider<P>,
        private_key: &str,
        chain_id: Option<u64>,
        confirmations: usize,
    ) -> Result<Self, ChainError> {
        let wallet = private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| ChainError::Connection(format!("Invalid private key: {}", e)))?;

        let chain_id = match chain_id {
            Some(id) => id,
            None => provider
                .get_chainid()
                .await
                .map_err(|e| ChainError::Connection(format!("Failed to fetch chain id: {}", e)))?
                .as_u64(),
        };
        debug!("Using chain id {}", chain_id);

        let wallet = wallet.with_chain_id(chain_id);
        let address = wallet.address();
        let client = SignerMiddleware::new(provider, wallet);

        Ok(Self {
            client: Arc::new(client),
            address,
            confirmations,
        })
    }
}

impl<M: Middleware + 'static> ChainConnection<M> {
    /// The underlying middleware, for building contract bindings.
    pub fn client(&self) -> Arc<M> {
        self.client.clone()
    }

    /// Address derived from the signing key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Latest block height known to the node.
    ///
    /// The value can be stale by the time a following call executes.
    pub async fn current_height(&self) -> Result<BlockNumber, ChainError> {
        let height = self
            .client
            .get_block_number()
            .await
            .map_err(|e| ChainError::Connection(format!("Failed to fetch block number: {}", e)))?;

        debug!("Current block height: {}", height);
        Ok(height.as_u64())
    }

    /// Signs and broadcasts a state-changing call.
    pub async fn submit(&self, call: CallKind, tx: TypedTransaction) -> Result<PendingCall, ChainError> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|e| ChainError::Submission {
                call: call.to_string(),
                reason: rejection_reason(&e),
            })?;

        let tx_hash = *pending;
        info!("Submitted {} transaction {:?}", call, tx_hash);

        Ok(PendingCall { call, tx_hash })
    }

    /// Waits until a submitted call is included with the configured number of
    /// confirmations.
    pub async fn wait(&self, pending: &PendingCall) -> Result<TransactionReceipt, ChainError> {
        let receipt = PendingTransaction::new(pending.tx_hash, self.client.provider())
            .confirmations(self.confirmations)
            .await
            .map_err(|e| {
                ChainError::Connection(format!(
                    "Failed waiting for {:?}: {}",
                    pending.tx_hash, e
                ))
            })?
            .ok_or_else(|| ChainError::Submission {
                call: pending.call.to_string(),
                reason: format!("transaction {:?} dropped before inclusion", pending.tx_hash),
            })?;

        if receipt.status == Some(U64::zero()) {
            return Err(ChainError::ExecutionReverted {
                tx_hash: pending.tx_hash,
                reason: "no reason given".to_string(),
            });
        }

        info!(
            "Transaction {:?} included in block {:?}",
            pending.tx_hash, receipt.block_number
        );
        Ok(receipt)
    }
}

/// Prefers the node's JSON-RPC message (which carries revert reasons from gas
/// estimation) over the middleware's wrapped error text.
fn rejection_reason<E: MiddlewareError>(error: &E) -> String {
    match error.as_error_response() {
        Some(response) => response.message.clone(),
        None => error.to_string(),
    }
}
