// LedgerStore - Persistent key-value storage using sled
//
// Holds:
// - The serialized ledger state
// - The contract's reserve balance
// - Named local keypairs

use crate::identity::Keypair;
use crate::ledger::{LedgerState, StateError};
use std::path::Path;
use thiserror::Error;

/// Key prefixes for organizing data
mod keys {
    pub const LEDGER_STATE: &[u8] = b"ledger:state";
    pub const CONTRACT_RESERVE: &[u8] = b"ledger:reserve";
    pub const IDENTITY_KEYPAIR_PREFIX: &[u8] = b"identity:keypair:";
}

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl From<StateError> for StoreError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::SerializationFailed(msg) => StoreError::SerializationFailed(msg),
            other => StoreError::DeserializationFailed(other.to_string()),
        }
    }
}

/// Persistent store for one deployed ledger
///
/// State and reserve are always written together in a single batch.
pub struct LedgerStore {
    db: sled::Db,
}

impl LedgerStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::FlushFailed(e.to_string()))?;
        Ok(())
    }

    /// Get raw bytes
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    // ========================================================================
    // LEDGER PERSISTENCE
    // ========================================================================

    /// Check whether a ledger has been deployed into this store
    pub fn has_state(&self) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(keys::LEDGER_STATE)?)
    }

    /// Load the ledger state
    pub fn load_state(&self) -> Result<Option<LedgerState>, StoreError> {
        match self.get_raw(keys::LEDGER_STATE)? {
            Some(bytes) => Ok(Some(LedgerState::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load the contract's reserve balance (0 before the first deposit)
    pub fn load_reserve(&self) -> Result<u64, StoreError> {
        match self.get_raw(keys::CONTRACT_RESERVE)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::DeserializationFailed("Invalid reserve length".to_string())
                })?;
                Ok(u64::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    /// Atomically replace the ledger state and reserve balance
    pub fn commit(&self, state: &LedgerState, reserve: u64) -> Result<(), StoreError> {
        let bytes = state.to_bytes()?;

        let mut batch = sled::Batch::default();
        batch.insert(keys::LEDGER_STATE, bytes);
        batch.insert(keys::CONTRACT_RESERVE, &reserve.to_le_bytes()[..]);
        self.db.apply_batch(batch)?;
        Ok(())
    }

    // ========================================================================
    // IDENTITY PERSISTENCE
    // ========================================================================

    fn keypair_key(label: &str) -> Vec<u8> {
        [keys::IDENTITY_KEYPAIR_PREFIX, label.as_bytes()].concat()
    }

    /// Save a keypair with a label
    pub fn save_keypair(&self, label: &str, keypair: &Keypair) -> Result<(), StoreError> {
        self.db.insert(Self::keypair_key(label), keypair.to_bytes())?;
        Ok(())
    }

    /// Load a keypair by label
    pub fn load_keypair(&self, label: &str) -> Result<Option<Keypair>, StoreError> {
        match self.get_raw(&Self::keypair_key(label))? {
            Some(bytes) => {
                let keypair = Keypair::from_bytes(&bytes)
                    .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
                Ok(Some(keypair))
            }
            None => Ok(None),
        }
    }

    /// Labels of all stored keypairs, sorted
    pub fn keypair_labels(&self) -> Result<Vec<String>, StoreError> {
        let mut labels = Vec::new();
        for result in self.db.scan_prefix(keys::IDENTITY_KEYPAIR_PREFIX) {
            let (key, _) = result?;
            let label = &key[keys::IDENTITY_KEYPAIR_PREFIX.len()..];
            labels.push(String::from_utf8_lossy(label).into_owned());
        }
        Ok(labels)
    }
}
