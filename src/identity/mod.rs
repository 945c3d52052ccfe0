// Identity module - Account addresses and local keypairs

mod address;
mod keypair;

pub use address::{Address, AddressError};
pub use keypair::{Keypair, KeypairError, PublicKey};
