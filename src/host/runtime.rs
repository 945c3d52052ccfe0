// Local host - load, apply, persist for every delivered message

use crate::config::{ConfigError, DeployConfig};
use crate::identity::Address;
use crate::ledger::{
    ExecutionContext, GetMethod, LedgerError, LedgerMachine, LedgerState, QueryValue,
};
use crate::message::{InboundMessage, Operation, OutboundMessage};
use crate::storage::{LedgerStore, StoreError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("No ledger deployed in this store")]
    NotDeployed,

    #[error("A ledger is already deployed in this store")]
    AlreadyDeployed,

    #[error("Message rejected (exit code {code}): {0}", code = .0.exit_code())]
    Rejected(#[from] LedgerError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// What a successful delivery produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub operation: Operation,
    /// Value transfers the host carried out
    pub outbound: Vec<OutboundMessage>,
    /// Contract reserve after the attached value and payouts
    pub reserve_after: u64,
}

/// Runtime owning one ledger store
///
/// `deliver` takes `&mut self`, so messages are processed strictly one at a time.
pub struct LocalHost {
    store: LedgerStore,
}

impl LocalHost {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Open the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        Ok(Self::new(LedgerStore::open(path)?))
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Create the ledger; fails if one already exists
    pub fn deploy(&mut self, config: &DeployConfig, deployer: Address) -> Result<LedgerState, HostError> {
        if self.store.has_state()? {
            return Err(HostError::AlreadyDeployed);
        }

        let state = config.initial_state(deployer)?;
        self.store.commit(&state, 0)?;
        self.store.flush()?;

        info!(
            owner = %deployer.short(),
            symbol = %state.metadata().symbol,
            price_units = state.price_units(),
            "Ledger deployed"
        );
        Ok(state)
    }

    /// Deliver one message
    ///
    /// On success the new state and reserve are flushed before returning. On
    /// rejection nothing is written: the state and the reserve stay as they
    /// were and the attached value counts as bounced.
    pub fn deliver(&mut self, message: &InboundMessage) -> Result<Receipt, HostError> {
        let mut state = self.state()?;
        let reserve = self.store.load_reserve()?;

        let contract_balance = reserve
            .checked_add(message.attached_value)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let ctx = ExecutionContext::new(contract_balance);

        let applied = LedgerMachine::apply(&mut state, message, &ctx)?;

        let paid_out = applied
            .outbound
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.value))
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let reserve_after = contract_balance
            .checked_sub(paid_out)
            .ok_or(LedgerError::InsufficientReserve {
                available: contract_balance,
                required: paid_out,
            })?;

        self.store.commit(&state, reserve_after)?;
        self.store.flush()?;

        Ok(Receipt {
            operation: applied.operation,
            outbound: applied.outbound,
            reserve_after,
        })
    }

    /// Current persisted state
    pub fn state(&self) -> Result<LedgerState, HostError> {
        self.store.load_state()?.ok_or(HostError::NotDeployed)
    }

    /// Run a get-method against the persisted state
    pub fn query(&self, method: &GetMethod) -> Result<QueryValue, HostError> {
        Ok(self.state()?.run_get_method(method))
    }

    /// Reserve currently held by the contract
    pub fn reserve(&self) -> Result<u64, HostError> {
        Ok(self.store.load_reserve()?)
    }
}
