//! # Vaultswap Types Library
//!
//! Snapshot data model for the Vaultswap pricing engine: tokens, pools,
//! staking incentives and user LP positions, plus the fixed-point primitives
//! they are built from.
//!
//! ## Design Philosophy
//!
//! - **Read-Only Snapshots**: every value is supplied per call by the data layer and never mutated
//! - **No Precision Loss**: amounts are `U256` base units, fractions are 18-decimal fixed point
//! - **Tagged Token Kinds**: fungible and vault-backed tokens are distinct enum variants
//! - **Clear Boundaries**: decimal strings in, decimal strings out; floats only for display
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Fraction, precision::parse_units};
//!
//! let fee = Fraction::from_decimal_str("0.003").unwrap();
//! let reserve = parse_units("1250.5", 18).unwrap();
//!
//! assert_eq!(fee, Fraction::from_bps(30));
//! assert!(!reserve.is_zero());
//! ```
//!
//! ## Integration Points
//!
//! - **Reserve/metadata provider**: deserializes `Pool` and `Token` snapshots (serde)
//! - **Pricing engine** (`vaultswap-amm`): consumes snapshots, returns quotes and routes
//! - **Configuration** (`vaultswap-config`): uses `Fraction` for slippage settings

pub mod common;
pub mod market;
pub mod precision;

// Re-export common types for convenience
pub use common::errors::{FixedPointError, ValidationError};
pub use common::fixed_point::Fraction;
pub use common::identifiers::{ChainId, CollectionAddress, IncentiveId, PoolAddress, TokenAddress, TokenId};

pub use market::{FungibleToken, Incentive, Pool, PoolSide, Token, UserPosition, VaultToken};

/// Wide unsigned integer used for every on-chain amount
pub use primitive_types::{U256, U512};
