// Deployment configuration - initial ledger values, loaded from JSON

use crate::identity::Address;
use crate::ledger::{price_from_usd, DustPolicy, LedgerState, TokenMetadata, DECIMALS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Values a ledger is deployed with
///
/// Prices are in US cents; the initial on-ledger price is
/// `initial_price_usd_cents * 10^9 / reserve_usd_cents` reserve nano-units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub description: String,
    /// `testnet` or `mainnet`; recorded in the artifact only
    pub network: String,
    pub version: String,
    pub initial_price_usd_cents: u64,
    pub reserve_usd_cents: u64,
    pub dust_policy: DustPolicy,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let metadata = TokenMetadata::default();
        Self {
            name: metadata.name,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
            description: metadata.description,
            network: "testnet".to_string(),
            version: "1.0.0".to_string(),
            initial_price_usd_cents: 150,
            reserve_usd_cents: 200,
            dust_policy: DustPolicy::Retain,
        }
    }
}

impl DeployConfig {
    /// Load from a JSON file; absent fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: DeployConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.decimals != DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "decimals must be {}, got {}",
                DECIMALS, self.decimals
            )));
        }
        if !matches!(self.network.as_str(), "testnet" | "mainnet") {
            return Err(ConfigError::Invalid(format!(
                "network must be testnet or mainnet, got '{}'",
                self.network
            )));
        }
        if self.initial_price_usd_cents == 0 || self.reserve_usd_cents == 0 {
            return Err(ConfigError::Invalid(
                "initial price and reserve rate must be positive".into(),
            ));
        }
        self.price_units()?;
        Ok(())
    }

    /// Initial price in reserve nano-units per whole token
    pub fn price_units(&self) -> Result<u64, ConfigError> {
        price_from_usd(self.initial_price_usd_cents, self.reserve_usd_cents)
            .map_err(|e| ConfigError::Invalid(format!("initial price: {}", e)))
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            description: self.description.clone(),
        }
    }

    /// Build the state a deployment by `deployer` starts from
    pub fn initial_state(&self, deployer: Address) -> Result<LedgerState, ConfigError> {
        self.validate()?;
        LedgerState::new(deployer, self.price_units()?, self.metadata(), self.dust_policy)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Ledger state at deploy time, with addresses in their `0x` text form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialStateSnapshot {
    pub total_supply: u64,
    pub owner: String,
    pub oracle: String,
    pub price_units: u64,
    pub frozen: bool,
    pub dust_policy: DustPolicy,
    pub metadata: TokenMetadata,
}

impl From<&LedgerState> for InitialStateSnapshot {
    fn from(state: &LedgerState) -> Self {
        Self {
            total_supply: state.get_total_supply(),
            owner: state.get_owner().to_string(),
            oracle: state.get_oracle().to_string(),
            price_units: state.get_price(),
            frozen: state.is_frozen(),
            dust_policy: state.dust_policy(),
            metadata: state.get_metadata(),
        }
    }
}

/// Record of a deployment, written as JSON
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentArtifact {
    pub config: DeployConfig,
    pub initial_state: InitialStateSnapshot,
    pub generated_at: DateTime<Utc>,
}

impl DeploymentArtifact {
    pub fn new(config: &DeployConfig, state: &LedgerState) -> Self {
        Self {
            config: config.clone(),
            initial_state: InitialStateSnapshot::from(state),
            generated_at: Utc::now(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
