//! Configuration files.
use alloy_primitives::Address;
use klay_primitives::{ChainParamsProvider, ProviderError};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// 25 ston, the fixed unit price of the public networks.
const DEFAULT_UNIT_PRICE: u64 = 25_000_000_000;

/// Chain id of the public test network.
const DEFAULT_CHAIN_ID: u64 = 1001;

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read, created or parsed.
    #[error("could not load config file: {0}")]
    Load(#[from] confy::ConfyError),
    /// The TOML document is invalid.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration of the transaction tooling.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Parameters used to fill transactions without querying a node.
    pub chain: ChainConfig,
}

impl Config {
    /// Loads the configuration at `path`, writing the defaults there if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    /// Writes the configuration to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        Ok(confy::store_path(path, self)?)
    }

    /// Parses a TOML document. Missing sections and keys take their default values.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }
}

/// Static chain parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain id transactions are bound to.
    pub chain_id: u64,
    /// Gas price in peb.
    pub gas_price: u64,
    /// Base fee per gas of the latest block in peb.
    pub base_fee_per_gas: u64,
    /// Priority fee per gas in peb, offered by dynamic fee transactions.
    pub max_priority_fee_per_gas: u64,
    /// Next nonce per account. Accounts not listed start at zero.
    pub nonces: BTreeMap<Address, u64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            gas_price: DEFAULT_UNIT_PRICE,
            base_fee_per_gas: DEFAULT_UNIT_PRICE,
            max_priority_fee_per_gas: 0,
            nonces: BTreeMap::new(),
        }
    }
}

/// A [`ChainParamsProvider`] answering from a [`ChainConfig`].
#[derive(Debug, Clone, Default)]
pub struct StaticChainParams {
    config: ChainConfig,
}

impl StaticChainParams {
    /// Creates a new provider from the given chain configuration.
    pub const fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying chain configuration.
    pub const fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl From<Config> for StaticChainParams {
    fn from(config: Config) -> Self {
        Self::new(config.chain)
    }
}

impl ChainParamsProvider for StaticChainParams {
    fn nonce(&self, address: Address) -> Result<u64, ProviderError> {
        Ok(self.config.nonces.get(&address).copied().unwrap_or_default())
    }

    fn gas_price(&self) -> Result<u128, ProviderError> {
        Ok(self.config.gas_price.into())
    }

    fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.config.chain_id)
    }

    fn base_fee_per_gas(&self) -> Result<u128, ProviderError> {
        Ok(self.config.base_fee_per_gas.into())
    }

    fn max_priority_fee_per_gas(&self) -> Result<u128, ProviderError> {
        Ok(self.config.max_priority_fee_per_gas.into())
    }
}
