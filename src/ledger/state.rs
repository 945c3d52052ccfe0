// Ledger state - the single persisted record the contract operates on

use crate::identity::Address;
use crate::ledger::balances::BalanceStore;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::pricing::DECIMALS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while encoding or decoding persisted state
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}

/// Token metadata, fixed at deploy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub description: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "SEQ2 Token".to_string(),
            symbol: "SEQ2".to_string(),
            decimals: DECIMALS,
            description: "SEQ2 utility token with $1.50 initial price".to_string(),
        }
    }
}

/// What a deposit does with reserve too small to buy one token unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DustPolicy {
    /// Keep the remainder in the contract reserve
    #[default]
    Retain,
    /// Send the remainder back to the depositor
    Refund,
}

/// Persisted ledger state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    total_supply: u64,
    owner: Address,
    oracle: Address,
    /// Reserve nano-units per whole token, never zero
    price_units: u64,
    frozen: bool,
    balances: BalanceStore,
    metadata: TokenMetadata,
    dust_policy: DustPolicy,
}

impl LedgerState {
    /// Fresh state for a deployment; owner and oracle start as the deployer
    pub fn new(
        deployer: Address,
        price_units: u64,
        metadata: TokenMetadata,
        dust_policy: DustPolicy,
    ) -> LedgerResult<Self> {
        if price_units == 0 {
            return Err(LedgerError::InvalidPrice);
        }

        Ok(Self {
            total_supply: 0,
            owner: deployer,
            oracle: deployer,
            price_units,
            frozen: false,
            balances: BalanceStore::new(),
            metadata,
            dust_policy,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn oracle(&self) -> &Address {
        &self.oracle
    }

    pub fn price_units(&self) -> u64 {
        self.price_units
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn balances(&self) -> &BalanceStore {
        &self.balances
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn dust_policy(&self) -> DustPolicy {
        self.dust_policy
    }

    // ========================================================================
    // MUTATORS (state machine only)
    // ========================================================================

    pub(crate) fn balances_mut(&mut self) -> &mut BalanceStore {
        &mut self.balances
    }

    pub(crate) fn increase_supply(&mut self, amount: u64) -> LedgerResult<()> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub(crate) fn decrease_supply(&mut self, amount: u64) -> LedgerResult<()> {
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub(crate) fn set_price(&mut self, price_units: u64) -> LedgerResult<()> {
        if price_units == 0 {
            return Err(LedgerError::InvalidPrice);
        }
        self.price_units = price_units;
        Ok(())
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub(crate) fn set_oracle(&mut self, oracle: Address) {
        self.oracle = oracle;
    }

    pub(crate) fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    // ========================================================================
    // INVARIANTS & SERIALIZATION
    // ========================================================================

    /// Check the structural invariants every reachable state satisfies
    pub fn check_invariants(&self) -> Result<(), StateError> {
        if self.price_units == 0 {
            return Err(StateError::InvariantViolated("price is zero".into()));
        }

        if self.balances.iter().any(|(_, amount)| *amount == 0) {
            return Err(StateError::InvariantViolated(
                "zero balance entry present".into(),
            ));
        }

        let sum = self.balances.sum();
        if sum != self.total_supply as u128 {
            return Err(StateError::InvariantViolated(format!(
                "total supply {} != sum of balances {}",
                self.total_supply, sum
            )));
        }

        Ok(())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        postcard::to_allocvec(self).map_err(|e| StateError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from bytes, rejecting states that break an invariant
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let state: LedgerState = postcard::from_bytes(bytes)
            .map_err(|e| StateError::DeserializationFailed(e.to_string()))?;
        state.check_invariants()?;
        Ok(state)
    }
}
