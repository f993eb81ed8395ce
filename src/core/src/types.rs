//! Address and block types shared by the client crates.

use crate::errors::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account or contract address.
pub use ethers::types::Address;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Parses a `0x`-prefixed (or bare) 40 digit hex string into an address.
///
/// Checksum casing is not enforced: two spellings of the same bytes are the
/// same address.
pub fn parse_address(input: &str) -> Result<Address, CoreError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != ADDRESS_LENGTH * 2 {
        return Err(CoreError::InvalidAddress {
            input: input.to_string(),
            reason: format!(
                "expected {} hex digits, got {}",
                ADDRESS_LENGTH * 2,
                digits.len()
            ),
        });
    }

    let bytes = hex::decode(digits).map_err(|e| CoreError::InvalidAddress {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    Ok(Address::from_slice(&bytes))
}

/// Renders an address with EIP-55 checksum casing.
pub fn format_address(address: &Address) -> String {
    ethers::utils::to_checksum(address, None)
}

/// Block height, represented as a 64-bit unsigned integer.
pub type BlockNumber = u64;

/// Either the chain head or a specific block height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockPointer {
    /// The most recent block the node knows about
    Latest,
    /// A fixed block height
    Number(BlockNumber),
}

impl FromStr for BlockPointer {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(BlockPointer::Latest);
        }

        let invalid = |reason: String| CoreError::InvalidBlock {
            input: input.to_string(),
            reason,
        };

        // `u64::from_str` accepts a leading '+', block heights do not
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                "expected 'latest' or a non-negative block number".to_string(),
            ));
        }

        trimmed
            .parse::<BlockNumber>()
            .map(BlockPointer::Number)
            .map_err(|e| invalid(e.to_string()))
    }
}

impl fmt::Display for BlockPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockPointer::Latest => write!(f, "latest"),
            BlockPointer::Number(n) => write!(f, "{}", n),
        }
    }
}
