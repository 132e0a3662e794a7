//! Integer arithmetic helpers
//!
//! Floor/ceil `a * b / d` over 512-bit intermediates, fraction scaling, and
//! the display helpers that turn fixed-point values into percentages.

use crate::error::{AmmError, Result};
use rust_decimal::Decimal;
use types::precision::{pow10, MAX_DECIMALS};
use types::{FixedPointError, Fraction, U256, U512};

/// Largest mantissa a `Decimal` can hold (2^96 - 1)
const DECIMAL_MAX_MANTISSA: u128 = (1u128 << 96) - 1;

/// `Fraction::SCALE` as `U256`
#[inline]
pub fn fraction_scale() -> U256 {
    U256::from(Fraction::SCALE)
}

/// Narrow a 512-bit intermediate back to `U256`
#[inline]
pub fn narrow(value: U512, context: &'static str) -> Result<U256> {
    U256::try_from(value).map_err(|_| AmmError::Overflow(context))
}

/// `floor(a * b / denominator)`
pub fn mul_div_floor(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero("mul_div_floor"));
    }
    narrow(a.full_mul(b) / U512::from(denominator), "mul_div_floor")
}

/// `ceil(a * b / denominator)`
pub fn mul_div_ceil(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero("mul_div_ceil"));
    }
    let (quotient, remainder) = a.full_mul(b).div_mod(U512::from(denominator));
    let rounded = if remainder.is_zero() {
        quotient
    } else {
        quotient + U512::one()
    };
    narrow(rounded, "mul_div_ceil")
}

/// `ceil(a / b)`
pub fn div_ceil(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero("div_ceil"));
    }
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        quotient
            .checked_add(U256::one())
            .ok_or(AmmError::Overflow("div_ceil"))
    }
}

/// `floor(numerator / denominator)` as a `Fraction`, saturating at `u64::MAX` raw
pub fn ratio_to_fraction(numerator: U512, denominator: U512) -> Result<Fraction> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero("ratio_to_fraction"));
    }
    let scaled = numerator
        .checked_mul(U512::from(Fraction::SCALE))
        .ok_or(AmmError::Overflow("ratio_to_fraction"))?
        / denominator;
    if scaled > U512::from(u64::MAX) {
        return Ok(Fraction::from_raw(u64::MAX));
    }
    Ok(Fraction::from_raw(scaled.low_u64()))
}

/// Base units to a `Decimal` of whole tokens
///
/// Keeps up to 18 fractional digits and drops further precision only when the
/// value would not otherwise fit the 96-bit `Decimal` mantissa.
pub fn units_to_decimal(amount: U256, decimals: u8) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(FixedPointError::UnsupportedPrecision {
            decimals,
            max: MAX_DECIMALS,
        }
        .into());
    }
    let mut scale = u32::from(decimals.min(18));
    let mut scaled = if decimals > 18 {
        amount / pow10(decimals - 18)?
    } else {
        amount
    };

    let max = U256::from(DECIMAL_MAX_MANTISSA);
    while scaled > max && scale > 0 {
        scaled = scaled / U256::from(10u8);
        scale -= 1;
    }
    if scaled > max {
        return Err(AmmError::Overflow("units_to_decimal"));
    }
    Decimal::try_from_i128_with_scale(scaled.as_u128() as i128, scale)
        .map_err(|_| AmmError::Overflow("units_to_decimal"))
}

/// `Fraction` as a percentage (`0.003` -> `0.3`)
pub fn fraction_to_percent(fraction: Fraction) -> Decimal {
    fraction.to_decimal() * Decimal::ONE_HUNDRED
}

/// Most fractional digits a `Decimal` can carry
const MAX_DISPLAY_PLACES: u32 = 28;

/// Render a percentage value for display
///
/// `value` is already in percent units. Zero renders as `"0%"`, positive
/// values too small for `decimal_places` as `"<0.01%"` (for 2 places).
pub fn format_percentage(value: Decimal, decimal_places: u32) -> String {
    if value.is_zero() {
        return "0%".to_string();
    }
    let decimal_places = decimal_places.min(MAX_DISPLAY_PLACES);
    let smallest = Decimal::new(1, decimal_places);
    if value.is_sign_positive() && value < smallest {
        return format!("<{}%", smallest);
    }
    format!("{}%", value.round_dp(decimal_places).normalize())
}
