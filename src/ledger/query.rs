// Query interface - read-only accessors over the ledger state

use crate::identity::Address;
use crate::ledger::state::{LedgerState, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named read-only accessor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GetMethod {
    TotalSupply,
    BalanceOf(Address),
    Price,
    Owner,
    Oracle,
    Frozen,
    Metadata,
}

/// Typed result of a get-method
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryValue {
    Amount(u64),
    Address(Address),
    Flag(bool),
    Metadata(TokenMetadata),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Amount(v) => write!(f, "{}", v),
            QueryValue::Address(a) => write!(f, "{}", a),
            QueryValue::Flag(b) => write!(f, "{}", b),
            QueryValue::Metadata(m) => write!(f, "{} ({}), {} decimals", m.name, m.symbol, m.decimals),
        }
    }
}

impl LedgerState {
    pub fn get_total_supply(&self) -> u64 {
        self.total_supply()
    }

    /// Balance of `addr`; unknown addresses hold 0
    pub fn get_balance_of(&self, addr: &Address) -> u64 {
        self.balances().get(addr)
    }

    pub fn get_price(&self) -> u64 {
        self.price_units()
    }

    pub fn get_owner(&self) -> Address {
        *self.owner()
    }

    pub fn get_oracle(&self) -> Address {
        *self.oracle()
    }

    pub fn get_metadata(&self) -> TokenMetadata {
        self.metadata().clone()
    }

    /// Run a get-method by name
    pub fn run_get_method(&self, method: &GetMethod) -> QueryValue {
        match method {
            GetMethod::TotalSupply => QueryValue::Amount(self.get_total_supply()),
            GetMethod::BalanceOf(addr) => QueryValue::Amount(self.get_balance_of(addr)),
            GetMethod::Price => QueryValue::Amount(self.get_price()),
            GetMethod::Owner => QueryValue::Address(self.get_owner()),
            GetMethod::Oracle => QueryValue::Address(self.get_oracle()),
            GetMethod::Frozen => QueryValue::Flag(self.is_frozen()),
            GetMethod::Metadata => QueryValue::Metadata(self.get_metadata()),
        }
    }
}
