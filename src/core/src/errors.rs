//! Error types for the core crate.

use thiserror::Error;

/// Errors raised while validating user-supplied values.
///
/// All of these are deterministic given the input and are detected before any
/// network access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when a decimal token amount cannot be represented exactly.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// The raw input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Error when an account or contract address is malformed.
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress {
        /// The raw input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Error when a block pointer is neither `latest` nor a block height.
    #[error("Invalid block '{input}': {reason}")]
    InvalidBlock {
        /// The raw input
        input: String,
        /// Why it was rejected
        reason: String,
    },
}
