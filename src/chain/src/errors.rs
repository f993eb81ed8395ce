//! Error types for the chain crate.

use ethers::types::TxHash;
use govtoken_core::BlockNumber;
use thiserror::Error;

/// Errors that can occur while talking to the node or the token contract.
#[derive(Error, Debug)]
pub enum ChainError {
    /// Error when the endpoint or the signing key is unusable, or the node
    /// cannot be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error when the node rejects a call before inclusion.
    #[error("Submission of {call} rejected: {reason}")]
    Submission {
        /// The call being submitted
        call: String,
        /// The node's explanation
        reason: String,
    },

    /// Error when an included transaction reverted.
    #[error("Transaction {tx_hash:?} reverted: {reason}")]
    ExecutionReverted {
        /// The reverted transaction
        tx_hash: TxHash,
        /// The revert reason, if the node surfaced one
        reason: String,
    },

    /// Error when a historical lookup targets a block that is not yet final.
    #[error("Invalid block {requested}: historical lookups need a block below the current height {current}")]
    InvalidBlock {
        /// The block that was asked for
        requested: BlockNumber,
        /// The node's height at the time of the request
        current: BlockNumber,
    },

    /// Error when the contract ABI or a method binding is unusable.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Error when the compiled contract artifact cannot be loaded.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Error when a receipt lacks data the call guarantees.
    #[error("Unexpected receipt for {tx_hash:?}: {reason}")]
    UnexpectedReceipt {
        /// The transaction the receipt belongs to
        tx_hash: TxHash,
        /// What was missing
        reason: String,
    },
}
