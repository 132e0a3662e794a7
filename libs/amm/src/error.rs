//! Engine error type
//!
//! Every domain failure is a value of [`AmmError`]. Route evaluation stores the
//! error on the rejected candidate and keeps going, so one bad pool never
//! aborts a batch.

use thiserror::Error;
use types::{FixedPointError, Fraction, TokenId, U256};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmmError {
    #[error("Reserves must be positive")]
    ZeroReserve,

    #[error("Pool has no LP supply")]
    ZeroSupply,

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: U256, available: U256 },

    #[error("Trade resolves to a non-positive amount")]
    NonPositiveOutput,

    #[error("Fee fraction {0} must be below 1")]
    InvalidFee(Fraction),

    /// Exceeding 256 bits is a defect for any realistic reserves
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("No pool pairs {token_in} with {token_out}")]
    NoRoute { token_in: TokenId, token_out: TokenId },

    #[error("Cannot route a token to itself")]
    IdenticalTokens,

    #[error("Token {0} is not in this pool")]
    UnknownToken(TokenId),

    #[error("Vault amount {amount} is not a whole multiple of {unit}")]
    VaultUnitMismatch { amount: U256, unit: U256 },

    #[error("Selected {selected} items but the trade requires {required}")]
    ItemCountMismatch { selected: u64, required: u64 },

    #[error(transparent)]
    InvalidAmount(#[from] FixedPointError),
}

pub type Result<T> = std::result::Result<T, AmmError>;
