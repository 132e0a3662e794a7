//! # Vaultswap AMM Library - Pricing, Routing and Liquidity Engine
//!
//! ## Purpose
//!
//! Pure calculation library for constant-product pools that pair fungible tokens
//! with vault tokens (fractional tokens redeemable one-per-unit for escrowed NFTs).
//! Turns pool reserves into swap quotes, slippage bounds, LP mint/burn amounts and
//! yield estimates, and applies the whole-unit rounding that vault sides require.
//!
//! ## Integration Points
//!
//! - **Input Sources**: `Pool`/`Token` snapshots from the reserve provider, user intent
//!   (amount, trade type, tolerance, deadline, selected NFTs)
//! - **Configuration**: `EngineConfig` from `vaultswap-config`, passed in explicitly
//! - **Output Destinations**: transaction builders (`ExecutionBounds`), display layers
//!   (`SwapRoute`, `MintQuote`, `BurnQuote`, `PoolYield`)
//!
//! ## Architecture Role
//!
//! ```text
//! math ─┬─ quote_math ─┬─ pool_traits ── router ── slippage
//!       │              └─ vault_math ──── liquidity_math
//!       └─ yield_math
//! ```
//!
//! Every function takes immutable snapshots and returns a value; nothing is
//! cached or mutated, so any number of quotes may run concurrently.
//!
//! ## Precision
//!
//! - **Amounts**: `U256` base units, products formed in `U512`
//! - **Fractions**: 18-decimal fixed point (`Fraction`)
//! - **USD figures**: `Decimal`; floats are never used in pricing

pub mod error;
pub mod liquidity_math;
pub mod math;
pub mod pool_traits;
pub mod quote_math;
pub mod router;
pub mod slippage;
pub mod vault_math;
pub mod yield_math;

pub use error::{AmmError, Result};
pub use liquidity_math::{BurnLeg, BurnQuote, LiquidityMath, MintQuote, PositionValue};
pub use math::format_percentage;
pub use pool_traits::{AmmPool, DirectedPool, PoolExt, PoolKind, TradeType};
pub use quote_math::QuoteMath;
pub use router::{PoolGraph, RouteFinder, RouteRequest, SwapRoute};
pub use slippage::{ExecutionBounds, SlippageMath};
pub use vault_math::{LegDirection, VaultLeg, VaultMath};
pub use yield_math::{PoolYield, YieldMath};

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
