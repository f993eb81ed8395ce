//! Ethereum contract bindings for the governance token.

use crate::errors::ChainError;
use ethers::{
    abi::{Abi, Detokenize, Tokenize},
    prelude::*,
};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const GOV_TOKEN_ABI: &str = include_str!("../contracts/GovToken.abi");

/// Parses the embedded token ABI.
pub fn gov_token_abi() -> Result<Abi, ChainError> {
    serde_json::from_str(GOV_TOKEN_ABI).map_err(|e| ChainError::Abi(format!("Invalid ABI: {}", e)))
}

/// Reads the creation bytecode from a compiled contract artifact.
///
/// Hardhat artifacts store it as `"bytecode": "0x..."`, Foundry artifacts as
/// `"bytecode": { "object": "0x..." }`. Both are accepted.
pub fn load_bytecode<P: AsRef<Path>>(path: P) -> Result<Bytes, ChainError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ChainError::Artifact(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let artifact: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
        ChainError::Artifact(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    let bytecode = match &artifact["bytecode"] {
        serde_json::Value::String(code) => code.as_str(),
        serde_json::Value::Object(object) => object
            .get("object")
            .and_then(|code| code.as_str())
            .unwrap_or_default(),
        _ => "",
    };

    let bytecode = Bytes::from_str(bytecode).map_err(|e| {
        ChainError::Artifact(format!("Invalid bytecode in {}: {}", path.display(), e))
    })?;
    if bytecode.is_empty() {
        return Err(ChainError::Artifact(format!(
            "{} has no creation bytecode",
            path.display()
        )));
    }

    Ok(bytecode)
}

/// The governance token contract interface
pub struct GovTokenContract<M: Middleware> {
    contract: Contract<M>,
}

impl<M: Middleware> GovTokenContract<M> {
    /// Creates a new instance of the contract
    pub fn new(address: Address, client: impl Into<Arc<M>>) -> Result<Self, ChainError> {
        let contract = Contract::new(address, gov_token_abi()?, client.into());
        Ok(Self { contract })
    }

    /// The address the binding points at
    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Mints new tokens to an account
    pub fn mint(&self, to: Address, amount: U256) -> Result<ContractCall<M, ()>, ChainError> {
        self.method("mint", (to, amount))
    }

    /// Delegates the caller's voting power
    pub fn delegate(&self, delegatee: Address) -> Result<ContractCall<M, ()>, ChainError> {
        self.method("delegate", (delegatee,))
    }

    /// Transfers tokens from the caller
    pub fn transfer(&self, to: Address, amount: U256) -> Result<ContractCall<M, bool>, ChainError> {
        self.method("transfer", (to, amount))
    }

    /// Gets the token balance of an account
    pub fn balance_of(&self, account: Address) -> Result<ContractCall<M, U256>, ChainError> {
        self.method("balanceOf", (account,))
    }

    /// Gets the current voting power of an account
    pub fn get_votes(&self, account: Address) -> Result<ContractCall<M, U256>, ChainError> {
        self.method("getVotes", (account,))
    }

    /// Gets the voting power of an account at a past block
    pub fn get_past_votes(
        &self,
        account: Address,
        timepoint: U256,
    ) -> Result<ContractCall<M, U256>, ChainError> {
        self.method("getPastVotes", (account, timepoint))
    }

    fn method<T: Tokenize, D: Detokenize>(
        &self,
        name: &str,
        args: T,
    ) -> Result<ContractCall<M, D>, ChainError> {
        self.contract
            .method(name, args)
            .map_err(|e| ChainError::Abi(format!("Method {} not found: {}", name, e)))
    }
}
