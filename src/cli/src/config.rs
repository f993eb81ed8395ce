//! Configuration for the CLI.

use anyhow::{Context, Result};
use govtoken_core::{parse_address, Address, CoreError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Full JSON-RPC endpoint; wins over `PROVIDER_KEY`.
pub const RPC_URL_VAR: &str = "RPC_URL";
/// Alchemy API key used to build a Sepolia endpoint.
pub const PROVIDER_KEY_VAR: &str = "PROVIDER_KEY";
/// Hex private key of the signing account.
pub const PRIVATE_KEY_VAR: &str = "MY_WALLET_PRIVATE_KEY";
pub const TOKEN_ADDRESS_VAR: &str = "TOKEN_ADDRESS";
pub const TOKEN_ARTIFACT_VAR: &str = "TOKEN_ARTIFACT";
pub const CHAIN_ID_VAR: &str = "CHAIN_ID";
pub const CONFIRMATIONS_VAR: &str = "CONFIRMATIONS";

const ALCHEMY_SEPOLIA: &str = "https://eth-sepolia.g.alchemy.com/v2/";

/// Builds the Sepolia endpoint for an Alchemy API key.
pub fn alchemy_url(key: &str) -> String {
    format!("{}{}", ALCHEMY_SEPOLIA, key)
}

/// Configuration for the CLI.
///
/// The signing key is not part of it and only comes from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The JSON-RPC endpoint to connect to
    pub rpc_url: String,
    /// Address of the deployed token contract
    pub contract: String,
    /// Compiled contract artifact holding the creation bytecode
    pub artifact: PathBuf,
    /// Chain id for signing; queried from the node when absent
    pub chain_id: Option<u64>,
    /// Blocks to wait for after a transaction is included
    pub confirmations: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract: "0x9805944Da4F69978dffc4c02eA924911D668d81a".to_string(),
            artifact: PathBuf::from("artifacts/contracts/G6Token.sol/G6Token.json"),
            chain_id: None,
            confirmations: 1,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Defaults, then the optional file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Overrides fields from environment variables that are set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var(RPC_URL_VAR) {
            self.rpc_url = url;
        } else if let Ok(key) = env::var(PROVIDER_KEY_VAR) {
            self.rpc_url = alchemy_url(&key);
        }

        if let Ok(contract) = env::var(TOKEN_ADDRESS_VAR) {
            self.contract = contract;
        }
        if let Ok(artifact) = env::var(TOKEN_ARTIFACT_VAR) {
            self.artifact = PathBuf::from(artifact);
        }
        if let Ok(chain_id) = env::var(CHAIN_ID_VAR) {
            let chain_id = chain_id
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {} '{}'", CHAIN_ID_VAR, chain_id))?;
            self.chain_id = Some(chain_id);
        }
        if let Ok(confirmations) = env::var(CONFIRMATIONS_VAR) {
            self.confirmations = confirmations
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid {} '{}'", CONFIRMATIONS_VAR, confirmations))?;
        }

        Ok(())
    }

    /// The configured token address, validated.
    pub fn contract_address(&self) -> Result<Address, CoreError> {
        parse_address(&self.contract)
    }
}

/// Reads the signing key from the environment.
///
/// A missing key yields an empty credential, which the connection rejects
/// when it is built.
pub fn private_key_from_env() -> String {
    env::var(PRIVATE_KEY_VAR).unwrap_or_default()
}
