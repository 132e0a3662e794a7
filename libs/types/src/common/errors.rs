//! Error types for fixed-point parsing and identifier validation
//!
//! Covers the failure modes of turning collaborator-supplied strings (decimal
//! amounts, fee fractions, hex addresses) into typed snapshot values.

use thiserror::Error;

/// Errors that can occur during typed identifier validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// ID value is null/zero when non-null required
    #[error("ID cannot be null/zero")]
    NullId,

    /// Hex string does not decode to the expected byte length
    #[error("Invalid address '{input}': expected {expected} bytes of hex")]
    InvalidAddress { input: String, expected: usize },

    /// Pool snapshot references the same token on both sides
    #[error("Pool tokens must be distinct")]
    IdenticalTokens,

    /// Token precision outside the supported range
    #[error("Token {symbol} has unsupported precision of {decimals} decimals")]
    UnsupportedDecimals { symbol: String, decimals: u8 },

    /// Custom validation failure with message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

/// Errors that can occur while converting decimal strings to fixed-point values
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixedPointError {
    /// Value exceeds the maximum representable value for the type
    #[error("Overflow: '{input}' exceeds maximum representable value")]
    Overflow { input: String },

    /// Negative values are not representable as base units or fractions
    #[error("Negative value '{input}' is not allowed")]
    Negative { input: String },

    /// Invalid decimal string format
    #[error("Invalid decimal string: '{input}' - expected numeric format")]
    InvalidDecimal { input: String },

    /// More fractional digits than the target precision can hold
    #[error("Precision loss: '{input}' has more than {decimals} fractional digits")]
    PrecisionLoss { input: String, decimals: u8 },

    /// Token precision beyond what `U256` base-unit math supports
    #[error("Unsupported precision: {decimals} decimals exceeds maximum of {max}")]
    UnsupportedPrecision { decimals: u8, max: u8 },

    /// Value is not finite (NaN or infinity)
    #[error("Value is not finite: {value}")]
    NotFinite { value: f64 },
}
