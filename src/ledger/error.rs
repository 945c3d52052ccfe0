// Ledger errors - every rejection aborts the operation with no state change

use thiserror::Error;

/// Exit codes reported to the host when an operation is rejected
pub mod exit_codes {
    pub const ERROR_NOT_OWNER: u32 = 100;
    pub const ERROR_NOT_AUTHORIZED: u32 = 101;
    pub const ERROR_FROZEN: u32 = 102;
    pub const ERROR_INSUFFICIENT_BALANCE: u32 = 103;
    pub const ERROR_INSUFFICIENT_RESERVE: u32 = 104;
    pub const ERROR_INVALID_AMOUNT: u32 = 105;
    pub const ERROR_INVALID_PRICE: u32 = 106;
    pub const ERROR_ARITHMETIC_OVERFLOW: u32 = 107;
    pub const ERROR_MALFORMED_PAYLOAD: u32 = 108;
    pub const ERROR_UNKNOWN_OPERATION: u32 = 0xffff;
}

/// Reasons the ledger rejects an operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Caller is not the owner")]
    NotOwner,

    #[error("Caller is neither the oracle nor the owner")]
    NotAuthorized,

    #[error("Ledger is frozen")]
    Frozen,

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("Insufficient reserve: available {available}, required {required}")]
    InsufficientReserve { available: u64, required: u64 },

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Payload is missing field '{0}'")]
    MalformedPayload(&'static str),

    #[error("Unknown operation code: {0}")]
    UnknownOperation(u32),
}

impl LedgerError {
    /// Numeric code surfaced to the host, unique per kind
    pub fn exit_code(&self) -> u32 {
        use exit_codes::*;
        match self {
            LedgerError::NotOwner => ERROR_NOT_OWNER,
            LedgerError::NotAuthorized => ERROR_NOT_AUTHORIZED,
            LedgerError::Frozen => ERROR_FROZEN,
            LedgerError::InsufficientBalance { .. } => ERROR_INSUFFICIENT_BALANCE,
            LedgerError::InsufficientReserve { .. } => ERROR_INSUFFICIENT_RESERVE,
            LedgerError::InvalidAmount => ERROR_INVALID_AMOUNT,
            LedgerError::InvalidPrice => ERROR_INVALID_PRICE,
            LedgerError::ArithmeticOverflow => ERROR_ARITHMETIC_OVERFLOW,
            LedgerError::MalformedPayload(_) => ERROR_MALFORMED_PAYLOAD,
            LedgerError::UnknownOperation(_) => ERROR_UNKNOWN_OPERATION,
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
