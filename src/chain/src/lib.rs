//! Chain access for the governance token client.
//!
//! This crate owns the signing connection to one node and the typed bindings
//! to one token contract. Everything above it talks to the chain through the
//! [`GovernanceToken`] trait.

pub mod bindings;
pub mod connection;
pub mod errors;
pub mod proxy;

pub use connection::{CallKind, ChainConnection, Confirmation, PendingCall, SignerClient};
pub use errors::ChainError;
pub use proxy::{ContractProxy, GovernanceToken};
