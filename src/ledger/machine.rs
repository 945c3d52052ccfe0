// Ledger state machine - dispatches one inbound message against the state
//
// Every operation runs on a working copy. The caller's state is replaced only
// when the whole operation succeeds, so a rejection never leaves a partial
// mutation behind.

use crate::identity::Address;
use crate::ledger::access::{require_oracle_or_owner, require_owner, require_unfrozen};
use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::pricing::{reserve_cost, reserve_for, tokens_for};
use crate::ledger::state::{DustPolicy, LedgerState};
use crate::message::{InboundMessage, Operation, OutboundKind, OutboundMessage};
use tracing::{debug, info, warn};

/// Host-supplied facts about the contract account at delivery time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Reserve held by the contract, including the value attached to the
    /// message being processed
    pub contract_balance: u64,
}

impl ExecutionContext {
    pub fn new(contract_balance: u64) -> Self {
        Self { contract_balance }
    }
}

/// Result of a successfully applied message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub operation: Operation,
    pub outbound: Vec<OutboundMessage>,
}

/// The ledger's message handler
pub struct LedgerMachine;

impl LedgerMachine {
    /// Apply one message; on error `state` is left untouched
    pub fn apply(
        state: &mut LedgerState,
        message: &InboundMessage,
        ctx: &ExecutionContext,
    ) -> LedgerResult<Applied> {
        debug!(
            sender = %message.sender.short(),
            op_code = message.op_code,
            value = message.attached_value,
            "Received message"
        );

        let mut working = state.clone();
        match Self::dispatch(&mut working, message, ctx) {
            Ok(applied) => {
                debug_assert!(working.check_invariants().is_ok());
                *state = working;
                info!(
                    op = applied.operation.name(),
                    sender = %message.sender.short(),
                    total_supply = state.total_supply(),
                    outbound = applied.outbound.len(),
                    "Operation applied"
                );
                Ok(applied)
            }
            Err(err) => {
                warn!(
                    op_code = message.op_code,
                    sender = %message.sender.short(),
                    exit_code = err.exit_code(),
                    error = %err,
                    "Operation rejected"
                );
                Err(err)
            }
        }
    }

    fn dispatch(
        state: &mut LedgerState,
        message: &InboundMessage,
        ctx: &ExecutionContext,
    ) -> LedgerResult<Applied> {
        let operation = message.operation()?;
        let sender = &message.sender;

        let outbound = match &operation {
            Operation::Mint { to, amount } => {
                Self::mint(state, sender, *to, *amount)?;
                Vec::new()
            }
            Operation::Burn { from, amount } => {
                Self::burn(state, sender, *from, *amount)?;
                Vec::new()
            }
            Operation::Transfer { to, amount } => {
                Self::transfer(state, sender, *to, *amount)?;
                Vec::new()
            }
            Operation::Deposit => Self::deposit(state, sender, message.attached_value)?,
            Operation::Withdraw { amount } => Self::withdraw(state, sender, *amount, ctx)?,
            Operation::SetPrice { new_price } => {
                require_oracle_or_owner(sender, state)?;
                state.set_price(*new_price)?;
                Vec::new()
            }
            Operation::SetFreeze { frozen } => {
                require_owner(sender, state)?;
                state.set_frozen(*frozen);
                Vec::new()
            }
            Operation::SetOracle { oracle } => {
                require_owner(sender, state)?;
                state.set_oracle(*oracle);
                Vec::new()
            }
            Operation::TransferOwnership { new_owner } => {
                require_owner(sender, state)?;
                state.set_owner(*new_owner);
                Vec::new()
            }
        };

        Ok(Applied {
            operation,
            outbound,
        })
    }

    // ========================================================================
    // BALANCE OPERATIONS
    // ========================================================================

    fn require_positive(amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(())
    }

    fn mint(state: &mut LedgerState, sender: &Address, to: Address, amount: u64) -> LedgerResult<()> {
        require_owner(sender, state)?;
        require_unfrozen(state)?;
        Self::require_positive(amount)?;

        state.increase_supply(amount)?;
        state.balances_mut().add(to, amount)?;
        Ok(())
    }

    fn burn(state: &mut LedgerState, sender: &Address, from: Address, amount: u64) -> LedgerResult<()> {
        // Holders burn their own tokens; only the owner may burn someone else's
        if *sender != from {
            require_owner(sender, state)?;
        }
        require_unfrozen(state)?;
        Self::require_positive(amount)?;

        state.balances_mut().sub(from, amount)?;
        state.decrease_supply(amount)?;
        Ok(())
    }

    fn transfer(state: &mut LedgerState, sender: &Address, to: Address, amount: u64) -> LedgerResult<()> {
        require_unfrozen(state)?;
        Self::require_positive(amount)?;

        state.balances_mut().sub(*sender, amount)?;
        state.balances_mut().add(to, amount)?;
        Ok(())
    }

    fn deposit(state: &mut LedgerState, sender: &Address, value: u64) -> LedgerResult<Vec<OutboundMessage>> {
        require_unfrozen(state)?;
        Self::require_positive(value)?;

        let price = state.price_units();
        let tokens = tokens_for(value, price)?;
        if tokens == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        state.increase_supply(tokens)?;
        state.balances_mut().add(*sender, tokens)?;

        let mut outbound = Vec::new();
        if state.dust_policy() == DustPolicy::Refund {
            let dust = value.saturating_sub(reserve_cost(tokens, price)?);
            if dust > 0 {
                outbound.push(OutboundMessage {
                    destination: *sender,
                    value: dust,
                    kind: OutboundKind::DustRefund,
                });
            }
        }

        Ok(outbound)
    }

    fn withdraw(
        state: &mut LedgerState,
        sender: &Address,
        amount: u64,
        ctx: &ExecutionContext,
    ) -> LedgerResult<Vec<OutboundMessage>> {
        require_unfrozen(state)?;
        Self::require_positive(amount)?;

        state.balances_mut().sub(*sender, amount)?;

        let reserve = reserve_for(amount, state.price_units())?;
        if reserve == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if reserve > ctx.contract_balance {
            return Err(LedgerError::InsufficientReserve {
                available: ctx.contract_balance,
                required: reserve,
            });
        }

        state.decrease_supply(amount)?;

        Ok(vec![OutboundMessage {
            destination: *sender,
            value: reserve,
            kind: OutboundKind::Withdrawal,
        }])
    }
}
