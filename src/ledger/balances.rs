// Balance store - sparse address -> amount dictionary

use crate::identity::Address;
use crate::ledger::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token balances keyed by address
///
/// Only nonzero balances are stored; setting an entry to zero removes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceStore {
    entries: BTreeMap<Address, u64>,
}

impl BalanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an address, 0 if absent
    pub fn get(&self, addr: &Address) -> u64 {
        self.entries.get(addr).copied().unwrap_or(0)
    }

    /// Overwrite a balance, removing the entry when `amount` is zero
    pub fn set(&mut self, addr: Address, amount: u64) {
        if amount == 0 {
            self.entries.remove(&addr);
        } else {
            self.entries.insert(addr, amount);
        }
    }

    /// Credit an address
    pub fn add(&mut self, addr: Address, delta: u64) -> LedgerResult<u64> {
        let updated = self
            .get(&addr)
            .checked_add(delta)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.set(addr, updated);
        Ok(updated)
    }

    /// Debit an address
    pub fn sub(&mut self, addr: Address, delta: u64) -> LedgerResult<u64> {
        let available = self.get(&addr);
        let updated = available
            .checked_sub(delta)
            .ok_or(LedgerError::InsufficientBalance {
                available,
                required: delta,
            })?;
        self.set(addr, updated);
        Ok(updated)
    }

    /// Number of addresses holding a nonzero balance
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no address holds tokens
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances, widened so it cannot overflow
    pub fn sum(&self) -> u128 {
        self.entries.values().map(|v| *v as u128).sum()
    }

    /// Iterate entries in address order
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.entries.iter()
    }
}
