// Ledger module - THE CONTRACT
// Balance store, price engine, access control, state machine and queries

mod access;
mod balances;
mod error;
mod machine;
mod pricing;
mod query;
mod state;

pub use access::{require_oracle_or_owner, require_owner, require_unfrozen};
pub use balances::BalanceStore;
pub use error::{exit_codes, LedgerError, LedgerResult};
pub use machine::{Applied, ExecutionContext, LedgerMachine};
pub use pricing::{
    price_from_usd, reserve_cost, reserve_for, tokens_for, DECIMALS, NANO_PER_COIN, SCALE,
};
pub use query::{GetMethod, QueryValue};
pub use state::{DustPolicy, LedgerState, StateError, TokenMetadata};
