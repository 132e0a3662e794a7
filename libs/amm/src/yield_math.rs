//! Fee APR from trailing volume, APR to APY compounding, and incentive reward APR
//!
//! All figures are `Decimal` USD values. Empty pools and zero volume report a
//! zero yield rather than an error.

use crate::error::{AmmError, Result};
use crate::math::units_to_decimal;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use types::{Incentive, Pool};

/// Compounding periods in the APY approximation (kept at 3650 for compatibility)
pub const COMPOUNDING_PERIODS: u64 = 3650;

pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Length of the volume window fed to [`YieldMath::apr`]
pub const TRAILING_WINDOW_DAYS: Decimal = dec!(7);

const SECONDS_PER_DAY: Decimal = dec!(86400);

/// Display-ready yield pair for a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolYield {
    pub apr: Decimal,
    pub apy: Decimal,
}

pub struct YieldMath;

impl YieldMath {
    /// `(volume / 7) * 365 * lp_fee / base_reserve`
    pub fn apr(trailing_week_volume_usd: Decimal, lp_fee: Decimal, base_reserve_usd: Decimal) -> Result<Decimal> {
        if base_reserve_usd <= Decimal::ZERO || trailing_week_volume_usd <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        trailing_week_volume_usd
            .checked_div(TRAILING_WINDOW_DAYS)
            .and_then(|daily| daily.checked_mul(DAYS_PER_YEAR))
            .and_then(|yearly| yearly.checked_mul(lp_fee))
            .and_then(|fees| fees.checked_div(base_reserve_usd))
            .ok_or(AmmError::Overflow("apr"))
    }

    /// `((1 + apr / 100 / 3650) ^ 3650 - 1) * 100`
    pub fn apy(apr: Decimal) -> Result<Decimal> {
        if apr <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        let periods = Decimal::from(COMPOUNDING_PERIODS);
        Decimal::ONE
            .checked_add(apr / Decimal::ONE_HUNDRED / periods)
            .and_then(|base| base.checked_powu(COMPOUNDING_PERIODS))
            .and_then(|growth| growth.checked_sub(Decimal::ONE))
            .and_then(|gain| gain.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(AmmError::Overflow("apy"))
    }

    /// Fee APR/APY of `pool`; only the LP share of the fee accrues to holders
    pub fn pool_yield(pool: &Pool, trailing_week_volume_usd: Decimal, base_reserve_usd: Decimal) -> Result<PoolYield> {
        let apr = Self::apr(trailing_week_volume_usd, pool.lp_fee.to_decimal(), base_reserve_usd)?;
        Ok(PoolYield {
            apr,
            apy: Self::apy(apr)?,
        })
    }

    /// Reward APR for stakers: `remaining_usd / remaining_days * 365 / staked_usd * 100`
    ///
    /// Zero when the incentive has ended, the reward token has no price, or
    /// nothing is staked.
    pub fn incentive_apr(incentive: &Incentive, staked_value_usd: Decimal, now: u64) -> Result<Decimal> {
        let remaining_seconds = incentive.remaining_seconds(now);
        let price = match incentive.reward_token.price_usd() {
            Some(price) if price > Decimal::ZERO => price,
            _ => return Ok(Decimal::ZERO),
        };
        if remaining_seconds == 0 || staked_value_usd <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let remaining_rewards_usd = units_to_decimal(incentive.remaining_reward, incentive.reward_token.decimals())?
            .checked_mul(price)
            .ok_or(AmmError::Overflow("incentive_apr"))?;
        let remaining_days = Decimal::from(remaining_seconds) / SECONDS_PER_DAY;

        remaining_rewards_usd
            .checked_div(remaining_days)
            .and_then(|daily| daily.checked_mul(DAYS_PER_YEAR))
            .and_then(|yearly| yearly.checked_div(staked_value_usd))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(AmmError::Overflow("incentive_apr"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool_traits::test_fixtures::{fungible, pool};
    use types::{IncentiveId, Token, U256};

    #[test]
    fn test_apr_trailing_week() {
        let apr = YieldMath::apr(dec!(7000), dec!(0.003), dec!(10000)).unwrap();
        assert_eq!(apr, dec!(0.1095));
    }

    #[test]
    fn test_apy_regression() {
        let apy = YieldMath::apy(dec!(0.1095)).unwrap();
        let expected = dec!(0.1095599566952058804267445114);
        assert!((apy - expected).abs() < dec!(0.000000000000001), "apy = {}", apy);
        assert!(apy > dec!(0.1095));
    }

    #[test]
    fn test_apy_of_thin_pool_apr_is_an_error() {
        // 40M weekly volume over a $1000 pool
        let apr = YieldMath::apr(dec!(40000000), dec!(0.003), dec!(1000)).unwrap();
        assert!(apr > dec!(6000));
        assert_eq!(YieldMath::apy(apr), Err(AmmError::Overflow("apy")));

        let p = pool(fungible(1, 18), fungible(2, 18), 1, 1, 30);
        assert!(YieldMath::pool_yield(&p, dec!(40000000), dec!(1000)).is_err());

        // high but representable
        let apy = YieldMath::apy(dec!(500)).unwrap();
        assert!(apy > dec!(14000) && apy < dec!(15000), "apy = {}", apy);
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(YieldMath::apr(dec!(7000), dec!(0.003), Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(YieldMath::apr(Decimal::ZERO, dec!(0.003), dec!(100)).unwrap(), Decimal::ZERO);
        assert_eq!(YieldMath::apy(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_pool_yield_uses_lp_fee_only() {
        let mut p = pool(fungible(1, 18), fungible(2, 18), 1, 1, 30);
        p.protocol_fee = Some(types::Fraction::from_bps(20));
        let y = YieldMath::pool_yield(&p, dec!(7000), dec!(10000)).unwrap();
        assert_eq!(y.apr, dec!(0.1095));
    }

    fn incentive(remaining_reward: U256) -> Incentive {
        let mut reward_token = fungible(9, 18);
        if let Token::Fungible(t) = &mut reward_token {
            t.price_usd = Some(dec!(2));
        }
        Incentive {
            id: IncentiveId::new(4),
            reward_token,
            start_time: 0,
            end_time: 10 * 86_400,
            total_reward: U256::exp10(21),
            remaining_reward,
        }
    }

    #[test]
    fn test_incentive_apr() {
        // 500 tokens at $2 over the last 5 days, 36_500 USD staked:
        // 1000 / 5 * 365 / 36500 * 100 = 200
        let inc = incentive(U256::exp10(18) * U256::from(500u64));
        let apr = YieldMath::incentive_apr(&inc, dec!(36500), 5 * 86_400).unwrap();
        assert_eq!(apr, dec!(200));
    }

    #[test]
    fn test_incentive_apr_zero_cases() {
        let inc = incentive(U256::exp10(18));
        assert_eq!(YieldMath::incentive_apr(&inc, dec!(100), 10 * 86_400).unwrap(), Decimal::ZERO);
        assert_eq!(YieldMath::incentive_apr(&inc, Decimal::ZERO, 0).unwrap(), Decimal::ZERO);

        let mut unpriced = inc.clone();
        if let Token::Fungible(t) = &mut unpriced.reward_token {
            t.price_usd = None;
        }
        assert_eq!(YieldMath::incentive_apr(&unpriced, dec!(100), 0).unwrap(), Decimal::ZERO);
    }
}
