//! Core primitives for the governance token client.
//!
//! This crate provides the value types every other crate agrees on: addresses,
//! block pointers and exact fixed-point token amounts, together with the
//! validation errors raised while parsing them from user input.

pub mod amount;
pub mod errors;
pub mod types;

// Re-export commonly used types
pub use amount::{TokenAmount, DECIMALS};
pub use errors::CoreError;
pub use types::{format_address, parse_address, Address, BlockNumber, BlockPointer};
