//! Slippage tolerance envelopes and transaction deadlines
//!
//! Tolerances are expected to be inside the configured `[min, max]` range;
//! `SlippageConfig::clamp` enforces that before values reach this module.

use crate::error::{AmmError, Result};
use crate::math::{fraction_scale, mul_div_ceil};
use crate::pool_traits::TradeType;
use crate::router::SwapRoute;
use config::EngineConfig;
use serde::{Deserialize, Serialize};
use types::precision::u256_dec_str;
use types::{Fraction, U256, U512};

const SECONDS_PER_MINUTE: u64 = 60;

/// Amounts and expiry to encode into a swap transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionBounds {
    pub trade_type: TradeType,
    /// Quoted input
    #[serde(with = "u256_dec_str")]
    pub amount_in: U256,
    /// Quoted output
    #[serde(with = "u256_dec_str")]
    pub amount_out: U256,
    /// Most the taker will pay; equals `amount_in` for exact-in trades
    #[serde(with = "u256_dec_str")]
    pub amount_in_max: U256,
    /// Least the taker accepts; equals `amount_out` for exact-out trades
    #[serde(with = "u256_dec_str")]
    pub amount_out_min: U256,
    pub tolerance: Fraction,
    /// Unix seconds
    pub deadline: u64,
}

pub struct SlippageMath;

impl SlippageMath {
    /// `floor(amount * (1 - tolerance))`, zero when tolerance exceeds one
    pub fn amount_min(amount: U256, tolerance: Fraction) -> U256 {
        let keep = match tolerance.complement() {
            Some(keep) => U256::from(keep.raw_value()),
            None => return U256::zero(),
        };
        // keep <= scale, so the quotient never exceeds `amount`
        let scaled = amount.full_mul(keep) / U512::from(fraction_scale());
        U256::try_from(scaled).unwrap_or(amount)
    }

    /// `ceil(amount * (1 + tolerance))`
    pub fn amount_max(amount: U256, tolerance: Fraction) -> Result<U256> {
        let grow = fraction_scale() + U256::from(tolerance.raw_value());
        mul_div_ceil(amount, grow, fraction_scale())
    }

    /// `now + minutes * 60`
    pub fn deadline(now_seconds: u64, minutes: u64) -> u64 {
        now_seconds.saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// Bounds for a resolved route
    ///
    /// Only the solved-for side is widened: exact-in trades get a minimum
    /// output, exact-out trades a maximum input. Invalid routes are refused.
    pub fn execution_bounds(
        route: &SwapRoute,
        tolerance: Fraction,
        now_seconds: u64,
        deadline_minutes: u64,
    ) -> Result<ExecutionBounds> {
        if !route.is_valid {
            return Err(route
                .invalid_reason
                .clone()
                .unwrap_or(AmmError::NonPositiveOutput));
        }

        let (amount_in_max, amount_out_min) = match route.trade_type {
            TradeType::ExactIn => (route.amount_in, Self::amount_min(route.amount_out, tolerance)),
            TradeType::ExactOut => (Self::amount_max(route.amount_in, tolerance)?, route.amount_out),
        };

        Ok(ExecutionBounds {
            trade_type: route.trade_type,
            amount_in: route.amount_in,
            amount_out: route.amount_out,
            amount_in_max,
            amount_out_min,
            tolerance,
            deadline: Self::deadline(now_seconds, deadline_minutes),
        })
    }

    /// [`execution_bounds`](Self::execution_bounds) with user settings resolved
    /// against the engine configuration
    pub fn execution_bounds_with_config(
        route: &SwapRoute,
        config: &EngineConfig,
        tolerance: Option<Fraction>,
        now_seconds: u64,
        deadline_minutes: Option<u64>,
    ) -> Result<ExecutionBounds> {
        Self::execution_bounds(
            route,
            config.slippage.resolve(tolerance),
            now_seconds,
            config.deadline.resolve(deadline_minutes),
        )
    }

    /// Minimum amounts accepted when depositing both sides of a pool
    pub fn liquidity_bounds(amount0: U256, amount1: U256, tolerance: Fraction) -> (U256, U256) {
        (
            Self::amount_min(amount0, tolerance),
            Self::amount_min(amount1, tolerance),
        )
    }
}
