//! Fixed-point token amounts.
//!
//! The token uses 18 fractional decimal digits. Human input such as `10.5` is
//! converted to base units (`10500000000000000000`) and back without ever
//! passing through floating point.

use crate::errors::CoreError;
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional decimal digits of the token.
pub const DECIMALS: usize = 18;

/// A token quantity in base units (1 token = 10^18 units).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero tokens.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Wraps a raw base-unit quantity.
    pub fn from_units(units: impl Into<U256>) -> Self {
        Self(units.into())
    }

    /// Returns the raw base-unit quantity.
    pub fn units(&self) -> U256 {
        self.0
    }

    /// Parses a non-negative decimal string with at most 18 fractional digits.
    ///
    /// Inputs that would need rounding are rejected rather than truncated.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("amount is empty"));
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("amount has no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal number"));
        }
        if fraction.len() > DECIMALS {
            return Err(invalid(&format!(
                "{} fractional digits, at most {} are supported",
                fraction.len(),
                DECIMALS
            )));
        }

        let mut digits = String::with_capacity(whole.len() + DECIMALS);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(DECIMALS - fraction.len()));

        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }

        U256::from_dec_str(digits)
            .map(Self)
            .map_err(|_| invalid("amount does not fit in 256 bits"))
    }

    /// Renders the amount as a decimal string, dropping trailing fractional zeros.
    pub fn format(&self) -> String {
        let digits = self.0.to_string();
        let padded = format!("{:0>width$}", digits, width = DECIMALS + 1);
        let (whole, fraction) = padded.split_at(padded.len() - DECIMALS);

        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        }
    }
}

impl From<U256> for TokenAmount {
    fn from(units: U256) -> Self {
        Self(units)
    }
}

impl FromStr for TokenAmount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
