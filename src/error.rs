//! Unified error types for the Hydra factory library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Caller errors (bad deposits, invalid pairs, duplicates)
//! are never retried internally; they surface verbatim and every state
//! change made by the failing operation is rolled back.

use thiserror::Error;

use crate::domain::Amount;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the factory, registry, pools, or math layer can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A deposit amount did not strictly exceed the protocol floor.
    ///
    /// `side` is `1` for the first caller-supplied amount and `2` for
    /// the second, matching argument order rather than canonical order.
    #[error("deposit {side} does not exceed the minimum deposit floor")]
    DepositTooSmall {
        /// Caller-side index of the offending amount.
        side: u8,
    },

    /// Self-pairing, a native/wrapped-native pairing, or the reserved
    /// zero id used as a real asset.
    #[error("invalid pair: {0}")]
    InvalidPair(&'static str),

    /// The canonical pair already has a registered pool.
    #[error("a pool already exists for this pair")]
    PoolExists,

    /// No pool is registered for the requested pair.
    #[error("no pool exists for this pair")]
    PoolNotFound,

    /// The native value attached to the call does not equal the
    /// declared native-side deposit.
    #[error("native value mismatch: expected {expected}, supplied {supplied}")]
    NativeValueMismatch {
        /// Native amount the request declared.
        expected: Amount,
        /// Native amount actually attached.
        supplied: Amount,
    },

    /// Custody reported the source account holds too little of the asset.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Custody reported the factory is not approved for the amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The holder owns fewer liquidity units than requested.
    #[error("insufficient liquidity units")]
    InsufficientUnits,

    /// The account's units are permanently locked (burn sink).
    #[error("liquidity units held by the burn sink cannot be redeemed")]
    LockedUnits,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A reserve required by the formula is zero.
    #[error("pool reserve is zero")]
    ZeroReserve,

    /// An amount argument is unusable (e.g. both deposit legs zero).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The pool's unit ledger is in a state the operation does not accept.
    #[error("invalid liquidity: {0}")]
    InvalidLiquidity(&'static str),

    /// A configuration value violates its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The registry store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A snapshot or config document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AmmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AmmError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
