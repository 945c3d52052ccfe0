// Storage module - PERSISTENCE
// Ledger state, contract reserve and local keypairs in sled

mod store;

pub use store::{LedgerStore, StoreError};
