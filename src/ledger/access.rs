// Access control - owner / oracle checks and the freeze switch

use crate::identity::Address;
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::state::LedgerState;

/// Fails with `NotOwner` unless `caller` owns the ledger
pub fn require_owner(caller: &Address, state: &LedgerState) -> LedgerResult<()> {
    if caller != state.owner() {
        return Err(LedgerError::NotOwner);
    }
    Ok(())
}

/// Fails with `NotAuthorized` unless `caller` is the oracle or the owner
pub fn require_oracle_or_owner(caller: &Address, state: &LedgerState) -> LedgerResult<()> {
    if caller != state.oracle() && caller != state.owner() {
        return Err(LedgerError::NotAuthorized);
    }
    Ok(())
}

/// Fails with `Frozen` while balance mutations are halted
pub fn require_unfrozen(state: &LedgerState) -> LedgerResult<()> {
    if state.is_frozen() {
        return Err(LedgerError::Frozen);
    }
    Ok(())
}
