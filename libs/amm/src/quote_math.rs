//! Constant-product quoting with exact integer calculations
//!
//! Every product of two amounts is formed in 512 bits before dividing, and the
//! fee is applied as an 18-decimal fraction inside the same rational expression,
//! so the fee-adjusted input is never rounded on its own.

use crate::error::{AmmError, Result};
use crate::math::{fraction_scale, mul_div_ceil, mul_div_floor, narrow, ratio_to_fraction, units_to_decimal};
use rust_decimal::Decimal;
use types::{Fraction, U256, U512};

/// Constant-product (x*y=k) quote functions
pub struct QuoteMath;

impl QuoteMath {
    /// Proportional conversion with no fee: `floor(amount * reserve_to / reserve_from)`
    ///
    /// Used to size the second side of a balanced liquidity deposit.
    pub fn quote(amount: U256, reserve_from: U256, reserve_to: U256) -> Result<U256> {
        if reserve_from.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        mul_div_floor(amount, reserve_to, reserve_from)
    }

    /// Exact output for `amount_in` after the taker fee
    ///
    /// `floor(in * (1 - fee) * reserve_out / (reserve_in + in * (1 - fee)))`
    pub fn calculate_output_amount(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee: Fraction,
    ) -> Result<U256> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        let keep = fee_multiplier(fee)?;

        let in_with_fee = amount_in.full_mul(keep);
        let numerator = in_with_fee
            .checked_mul(U512::from(reserve_out))
            .ok_or(AmmError::Overflow("calculate_output_amount"))?;
        let denominator = reserve_in
            .full_mul(fraction_scale())
            .checked_add(in_with_fee)
            .ok_or(AmmError::Overflow("calculate_output_amount"))?;

        let amount_out = narrow(numerator / denominator, "calculate_output_amount")?;
        if amount_out.is_zero() {
            return Err(AmmError::NonPositiveOutput);
        }
        Ok(amount_out)
    }

    /// Input required to receive exactly `amount_out`, rounded against the taker
    pub fn calculate_input_amount(
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee: Fraction,
    ) -> Result<U256> {
        if amount_out.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                requested: amount_out,
                available: reserve_out,
            });
        }
        let keep = fee_multiplier(fee)?;

        let amount_in_net = mul_div_ceil(reserve_in, amount_out, reserve_out - amount_out)?;
        mul_div_ceil(amount_in_net, fraction_scale(), keep)
    }

    /// `1 - (amount_out / amount_in) / (reserve_out / reserve_in)` against pre-trade reserves
    pub fn calculate_price_impact(
        amount_in: U256,
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<Fraction> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        let execution_vs_spot = ratio_to_fraction(
            amount_out.full_mul(reserve_in),
            amount_in.full_mul(reserve_out),
        )?;
        Ok(Fraction::ONE.saturating_sub(execution_vs_spot))
    }

    /// Whole `out` tokens per whole `in` token at the current reserves
    pub fn spot_price(
        reserve_in: U256,
        decimals_in: u8,
        reserve_out: U256,
        decimals_out: u8,
    ) -> Result<Decimal> {
        if reserve_in.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        let base = units_to_decimal(reserve_in, decimals_in)?;
        let quote = units_to_decimal(reserve_out, decimals_out)?;
        if base.is_zero() {
            // reserve smaller than the Decimal precision kept for this token
            return Err(AmmError::DivisionByZero("spot_price"));
        }
        quote
            .checked_div(base)
            .ok_or(AmmError::Overflow("spot_price"))
    }
}

/// Raw `1 - fee` scaled by 10^18, rejecting fees of 100% or more
fn fee_multiplier(fee: Fraction) -> Result<U256> {
    match fee.complement() {
        Some(keep) if !keep.is_zero() => Ok(U256::from(keep.raw_value())),
        _ => Err(AmmError::InvalidFee(fee)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_output_amount_with_fee() {
        // 100 * 0.997 * 1000 / (1000 + 99.7) = 90.66
        let out = QuoteMath::calculate_output_amount(u(100), u(1000), u(1000), Fraction::from_bps(30)).unwrap();
        assert_eq!(out, u(90));
    }

    #[test]
    fn test_output_amount_exact_division() {
        let out = QuoteMath::calculate_output_amount(u(1000), u(1000), u(1000), Fraction::ZERO).unwrap();
        assert_eq!(out, u(500));
        // constant product holds exactly
        assert_eq!(u(1000) * u(1000), (u(1000) + u(1000)) * (u(1000) - out));
    }

    #[test]
    fn test_input_amount_never_undercharges() {
        let fee = Fraction::from_bps(30);
        let needed = QuoteMath::calculate_input_amount(u(90), u(1000), u(1000), fee).unwrap();
        // ceil(1000*90/910) = 99, ceil(99 / 0.997) = 100
        assert_eq!(needed, u(100));
        let out = QuoteMath::calculate_output_amount(needed, u(1000), u(1000), fee).unwrap();
        assert!(out >= u(90));
    }

    #[test]
    fn test_round_trip_without_fee() {
        let out = QuoteMath::calculate_output_amount(u(100), u(1_000), u(10_000), Fraction::ZERO).unwrap();
        let back = QuoteMath::calculate_input_amount(out, u(1_000), u(10_000), Fraction::ZERO).unwrap();
        assert_eq!(back, u(100));
    }

    #[test]
    fn test_insufficient_liquidity() {
        let err = QuoteMath::calculate_input_amount(u(1000), u(1000), u(1000), Fraction::ZERO).unwrap_err();
        assert_eq!(
            err,
            AmmError::InsufficientLiquidity {
                requested: u(1000),
                available: u(1000)
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let fee = Fraction::from_bps(30);
        assert_eq!(
            QuoteMath::calculate_output_amount(U256::zero(), u(1), u(1), fee),
            Err(AmmError::ZeroAmount)
        );
        assert_eq!(
            QuoteMath::calculate_output_amount(u(1), U256::zero(), u(1), fee),
            Err(AmmError::ZeroReserve)
        );
        assert_eq!(
            QuoteMath::calculate_output_amount(u(10), u(1), u(1), Fraction::ONE),
            Err(AmmError::InvalidFee(Fraction::ONE))
        );
        // dust input rounds to nothing
        assert_eq!(
            QuoteMath::calculate_output_amount(u(1), u(1_000_000), u(1_000), fee),
            Err(AmmError::NonPositiveOutput)
        );
    }

    #[test]
    fn test_quote_proportional() {
        assert_eq!(QuoteMath::quote(u(100), u(1000), u(500)).unwrap(), u(50));
        assert_eq!(QuoteMath::quote(u(100), U256::zero(), u(500)), Err(AmmError::ZeroReserve));
    }

    #[test]
    fn test_price_impact() {
        // 1000/1000 pool, 1000 in for 500 out: execution rate is half the spot rate
        let impact = QuoteMath::calculate_price_impact(u(1000), u(500), u(1000), u(1000)).unwrap();
        assert_eq!(impact.to_decimal(), dec!(0.5));

        let none = QuoteMath::calculate_price_impact(u(10), u(20), u(1000), u(2000)).unwrap();
        assert!(none.is_zero());
    }

    #[test]
    fn test_spot_price_decimal_adjusted() {
        // 10 tokens (18 dp) against 25_000 tokens (6 dp)
        let price = QuoteMath::spot_price(U256::exp10(19), 18, u(25_000_000_000), 6).unwrap();
        assert_eq!(price, dec!(2500));
    }
}
