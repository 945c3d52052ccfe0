// Message model - what the host delivers to the ledger and what it sends back

use crate::identity::Address;
use crate::ledger::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Operation codes carried on the wire
pub mod op_codes {
    pub const OP_MINT: u32 = 1;
    pub const OP_BURN: u32 = 2;
    pub const OP_TRANSFER: u32 = 3;
    pub const OP_DEPOSIT: u32 = 4;
    pub const OP_WITHDRAW: u32 = 5;
    pub const OP_SET_PRICE: u32 = 6;
    pub const OP_SET_FREEZE: u32 = 7;
    pub const OP_SET_ORACLE: u32 = 8;
    pub const OP_TRANSFER_OWNERSHIP: u32 = 9;
}

/// Operation-specific fields; unused fields stay at their defaults
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub to: Option<Address>,
    pub from: Option<Address>,
    pub amount: u64,
    pub new_price: u64,
    pub new_flag: bool,
    /// New oracle or new owner, depending on the operation
    pub new_address: Option<Address>,
}

/// An authenticated internal message as delivered by the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub sender: Address,
    /// Reserve value attached to the message
    pub attached_value: u64,
    pub op_code: u32,
    pub payload: Payload,
}

impl InboundMessage {
    /// Build a message from raw parts
    pub fn new(sender: Address, attached_value: u64, op_code: u32, payload: Payload) -> Self {
        Self {
            sender,
            attached_value,
            op_code,
            payload,
        }
    }

    /// Build a message carrying a typed operation
    pub fn from_operation(sender: Address, attached_value: u64, operation: &Operation) -> Self {
        let (op_code, payload) = operation.encode();
        Self::new(sender, attached_value, op_code, payload)
    }

    pub fn mint(sender: Address, to: Address, amount: u64) -> Self {
        Self::from_operation(sender, 0, &Operation::Mint { to, amount })
    }

    pub fn burn(sender: Address, from: Address, amount: u64) -> Self {
        Self::from_operation(sender, 0, &Operation::Burn { from, amount })
    }

    pub fn transfer(sender: Address, to: Address, amount: u64) -> Self {
        Self::from_operation(sender, 0, &Operation::Transfer { to, amount })
    }

    pub fn deposit(sender: Address, value: u64) -> Self {
        Self::from_operation(sender, value, &Operation::Deposit)
    }

    pub fn withdraw(sender: Address, amount: u64) -> Self {
        Self::from_operation(sender, 0, &Operation::Withdraw { amount })
    }

    pub fn set_price(sender: Address, new_price: u64) -> Self {
        Self::from_operation(sender, 0, &Operation::SetPrice { new_price })
    }

    pub fn set_freeze(sender: Address, frozen: bool) -> Self {
        Self::from_operation(sender, 0, &Operation::SetFreeze { frozen })
    }

    pub fn set_oracle(sender: Address, oracle: Address) -> Self {
        Self::from_operation(sender, 0, &Operation::SetOracle { oracle })
    }

    pub fn transfer_ownership(sender: Address, new_owner: Address) -> Self {
        Self::from_operation(sender, 0, &Operation::TransferOwnership { new_owner })
    }

    /// Decode the typed operation this message asks for
    pub fn operation(&self) -> LedgerResult<Operation> {
        Operation::decode(self.op_code, &self.payload)
    }
}

/// Typed ledger operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Mint { to: Address, amount: u64 },
    /// Self-burn when `from` is the sender, owner-forced burn otherwise
    Burn { from: Address, amount: u64 },
    Transfer { to: Address, amount: u64 },
    Deposit,
    Withdraw { amount: u64 },
    SetPrice { new_price: u64 },
    SetFreeze { frozen: bool },
    SetOracle { oracle: Address },
    TransferOwnership { new_owner: Address },
}

impl Operation {
    /// Wire code of this operation
    pub fn op_code(&self) -> u32 {
        use op_codes::*;
        match self {
            Operation::Mint { .. } => OP_MINT,
            Operation::Burn { .. } => OP_BURN,
            Operation::Transfer { .. } => OP_TRANSFER,
            Operation::Deposit => OP_DEPOSIT,
            Operation::Withdraw { .. } => OP_WITHDRAW,
            Operation::SetPrice { .. } => OP_SET_PRICE,
            Operation::SetFreeze { .. } => OP_SET_FREEZE,
            Operation::SetOracle { .. } => OP_SET_ORACLE,
            Operation::TransferOwnership { .. } => OP_TRANSFER_OWNERSHIP,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Mint { .. } => "mint",
            Operation::Burn { .. } => "burn",
            Operation::Transfer { .. } => "transfer",
            Operation::Deposit => "deposit",
            Operation::Withdraw { .. } => "withdraw",
            Operation::SetPrice { .. } => "set_price",
            Operation::SetFreeze { .. } => "set_freeze",
            Operation::SetOracle { .. } => "set_oracle",
            Operation::TransferOwnership { .. } => "transfer_ownership",
        }
    }

    /// Split into wire code and payload
    pub fn encode(&self) -> (u32, Payload) {
        let mut payload = Payload::default();
        match self {
            Operation::Mint { to, amount } | Operation::Transfer { to, amount } => {
                payload.to = Some(*to);
                payload.amount = *amount;
            }
            Operation::Burn { from, amount } => {
                payload.from = Some(*from);
                payload.amount = *amount;
            }
            Operation::Deposit => {}
            Operation::Withdraw { amount } => payload.amount = *amount,
            Operation::SetPrice { new_price } => payload.new_price = *new_price,
            Operation::SetFreeze { frozen } => payload.new_flag = *frozen,
            Operation::SetOracle { oracle } => payload.new_address = Some(*oracle),
            Operation::TransferOwnership { new_owner } => payload.new_address = Some(*new_owner),
        }
        (self.op_code(), payload)
    }

    /// Rebuild from wire code and payload
    pub fn decode(op_code: u32, payload: &Payload) -> LedgerResult<Self> {
        use op_codes::*;
        let required = |field: Option<Address>, name: &'static str| {
            field.ok_or(LedgerError::MalformedPayload(name))
        };

        let operation = match op_code {
            OP_MINT => Operation::Mint {
                to: required(payload.to, "to")?,
                amount: payload.amount,
            },
            OP_BURN => Operation::Burn {
                from: required(payload.from, "from")?,
                amount: payload.amount,
            },
            OP_TRANSFER => Operation::Transfer {
                to: required(payload.to, "to")?,
                amount: payload.amount,
            },
            OP_DEPOSIT => Operation::Deposit,
            OP_WITHDRAW => Operation::Withdraw {
                amount: payload.amount,
            },
            OP_SET_PRICE => Operation::SetPrice {
                new_price: payload.new_price,
            },
            OP_SET_FREEZE => Operation::SetFreeze {
                frozen: payload.new_flag,
            },
            OP_SET_ORACLE => Operation::SetOracle {
                oracle: required(payload.new_address, "new_address")?,
            },
            OP_TRANSFER_OWNERSHIP => Operation::TransferOwnership {
                new_owner: required(payload.new_address, "new_address")?,
            },
            other => return Err(LedgerError::UnknownOperation(other)),
        };

        Ok(operation)
    }
}

/// Why the ledger sends value out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundKind {
    /// Reserve redeemed by burning tokens
    Withdrawal,
    /// Deposit remainder too small to buy one token unit
    DustRefund,
}

/// Value transfer the host must carry out after a successful operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub destination: Address,
    pub value: u64,
    pub kind: OutboundKind,
}
