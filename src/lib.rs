//! SEQ2 ledger
//!
//! A persistent, message-driven token ledger. Holders deposit reserve
//! currency to buy tokens at the current price and burn tokens to redeem
//! reserve. The owner mints and administers the ledger, a price oracle
//! updates the price, and a freeze switch halts every balance mutation.
//!
//! - [`ledger`]: balance store, price engine, access control, state machine, queries
//! - [`message`]: inbound/outbound messages and their wire codec
//! - [`storage`]: sled-backed persistence
//! - [`host`]: local runtime that delivers messages one at a time
//! - [`config`]: deployment configuration
//! - [`identity`]: addresses and local keypairs

pub mod config;
pub mod host;
pub mod identity;
pub mod ledger;
pub mod message;
pub mod storage;
