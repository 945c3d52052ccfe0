// Host module - local single-process runtime for the ledger
// Delivers one message at a time, persists state and applies value transfers

mod runtime;

pub use runtime::{HostError, LocalHost, Receipt};
