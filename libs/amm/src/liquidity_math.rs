//! LP share mint and burn accounting
//!
//! Mint: `lp = total_supply == 0 ? amount_in : floor(amount_in * total_supply / reserve_in)`.
//! Burn: `amount = floor(lp * reserve / total_supply)`, with vault sides floored
//! to whole NFTs and the remainder reported as residual instead of dropped.

use crate::error::{AmmError, Result};
use crate::math::{mul_div_floor, ratio_to_fraction, units_to_decimal};
use crate::pool_traits::DirectedPool;
use crate::quote_math::QuoteMath;
use crate::vault_math::{LegDirection, VaultMath};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;
use types::precision::u256_dec_str;
use types::{Fraction, IncentiveId, Pool, PoolSide, Token, TokenId, UserPosition, U256, U512};

/// Result of depositing into a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintQuote {
    #[serde(with = "u256_dec_str")]
    pub amount0: U256,
    #[serde(with = "u256_dec_str")]
    pub amount1: U256,
    #[serde(with = "u256_dec_str")]
    pub lp_out: U256,
    /// Depositor's share of the pool after minting
    pub share_of_pool: Fraction,
}

/// One token side of an LP burn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnLeg {
    pub token: TokenId,
    /// Pro-rata share of the reserve
    #[serde(with = "u256_dec_str")]
    pub amount: U256,
    /// Part of `amount` that can be withdrawn; whole units for vault tokens
    #[serde(with = "u256_dec_str")]
    pub redeemable: U256,
    /// Sub-unit remainder of a vault side
    #[serde(default, with = "u256_dec_str::option", skip_serializing_if = "Option::is_none")]
    pub residual: Option<U256>,
    /// LP-equivalent of `residual`
    #[serde(with = "u256_dec_str")]
    pub residual_lp: U256,
    /// NFTs redeemable on a vault side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
}

/// Result of burning LP tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnQuote {
    #[serde(with = "u256_dec_str")]
    pub lp_amount: U256,
    pub leg0: BurnLeg,
    pub leg1: BurnLeg,
    /// Fraction of the supply being burned
    pub share_of_pool: Fraction,
}

/// Underlying value of a user's LP holdings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionValue {
    #[serde(with = "u256_dec_str")]
    pub total_lp: U256,
    pub share_of_pool: Fraction,
    #[serde(with = "u256_dec_str")]
    pub amount0: U256,
    #[serde(with = "u256_dec_str")]
    pub amount1: U256,
    /// Present only when both tokens carry a reference price
    pub value_usd: Option<Decimal>,
    /// Subscribed incentives still streaming rewards
    pub active_incentives: Vec<IncentiveId>,
}

pub struct LiquidityMath;

impl LiquidityMath {
    /// LP minted for a single-side amount
    ///
    /// The first deposit into an empty pool mints `amount_in` one-to-one.
    pub fn lp_tokens_for_deposit(amount_in: U256, reserve_in: U256, total_supply: U256) -> Result<U256> {
        if total_supply.is_zero() {
            return Ok(amount_in);
        }
        if reserve_in.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        mul_div_floor(amount_in, total_supply, reserve_in)
    }

    /// Reserve share owed for `lp_amount`; zero while the pool has no supply
    pub fn tokens_for_lp(lp_amount: U256, reserve: U256, total_supply: U256) -> Result<U256> {
        if total_supply.is_zero() {
            return Ok(U256::zero());
        }
        mul_div_floor(lp_amount, reserve, total_supply)
    }

    /// Paired amount keeping a deposit at the current pool ratio
    pub fn quote_deposit(pool: &Pool, token_in: TokenId, amount_in: U256) -> Result<U256> {
        let view = DirectedPool::new(pool, token_in)?;
        QuoteMath::quote(amount_in, view.reserve_in(), view.reserve_out())
    }

    /// Balanced single-sided entry: sizes the other side, then mints
    pub fn add_liquidity_balanced(pool: &Pool, token_in: TokenId, amount_in: U256) -> Result<MintQuote> {
        let paired = Self::quote_deposit(pool, token_in, amount_in)?;
        match pool.side_of(token_in) {
            Some(PoolSide::Token0) => Self::add_liquidity(pool, amount_in, paired),
            Some(PoolSide::Token1) => Self::add_liquidity(pool, paired, amount_in),
            None => Err(AmmError::UnknownToken(token_in)),
        }
    }

    /// Mint quote for a two-sided deposit
    ///
    /// LP out is the smaller of the two per-side mints, so an unbalanced
    /// deposit donates its excess to the pool.
    pub fn add_liquidity(pool: &Pool, amount0: U256, amount1: U256) -> Result<MintQuote> {
        let total_supply = pool.total_supply;

        let lp_out = if total_supply.is_zero() {
            // Seeds one-to-one from the token0 side
            if amount0.is_zero() || amount1.is_zero() {
                return Err(AmmError::ZeroAmount);
            }
            amount0
        } else {
            let lp0 = Self::lp_tokens_for_deposit(amount0, pool.reserve0, total_supply)?;
            let lp1 = Self::lp_tokens_for_deposit(amount1, pool.reserve1, total_supply)?;
            lp0.min(lp1)
        };
        if lp_out.is_zero() {
            return Err(AmmError::NonPositiveOutput);
        }

        let supply_after = total_supply
            .checked_add(lp_out)
            .ok_or(AmmError::Overflow("add_liquidity"))?;
        let share_of_pool = ratio_to_fraction(U512::from(lp_out), U512::from(supply_after))?;

        trace!(
            pool = %pool.address,
            amount0 = %amount0,
            amount1 = %amount1,
            lp_out = %lp_out,
            "Mint quote"
        );

        Ok(MintQuote {
            amount0,
            amount1,
            lp_out,
            share_of_pool,
        })
    }

    /// Burn quote for `lp_amount`
    pub fn remove_liquidity(pool: &Pool, lp_amount: U256) -> Result<BurnQuote> {
        let total_supply = pool.total_supply;
        if total_supply.is_zero() {
            return Err(AmmError::ZeroSupply);
        }
        if lp_amount.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if lp_amount > total_supply {
            return Err(AmmError::InsufficientLiquidity {
                requested: lp_amount,
                available: total_supply,
            });
        }

        let leg0 = Self::burn_leg(&pool.token0, lp_amount, pool.reserve0, total_supply)?;
        let leg1 = Self::burn_leg(&pool.token1, lp_amount, pool.reserve1, total_supply)?;
        let share_of_pool = ratio_to_fraction(U512::from(lp_amount), U512::from(total_supply))?;

        trace!(
            pool = %pool.address,
            lp_amount = %lp_amount,
            amount0 = %leg0.amount,
            amount1 = %leg1.amount,
            "Burn quote"
        );

        Ok(BurnQuote {
            lp_amount,
            leg0,
            leg1,
            share_of_pool,
        })
    }

    fn burn_leg(token: &Token, lp_amount: U256, reserve: U256, total_supply: U256) -> Result<BurnLeg> {
        let amount = Self::tokens_for_lp(lp_amount, reserve, total_supply)?;

        let Token::Vault(vault) = token else {
            return Ok(BurnLeg {
                token: token.id(),
                amount,
                redeemable: amount,
                residual: None,
                residual_lp: U256::zero(),
                item_count: None,
            });
        };

        let plan = VaultMath::plan_leg(vault, amount, LegDirection::Output)?;
        let residual_lp = match plan.leftover {
            Some(residual) if !reserve.is_zero() => mul_div_floor(residual, total_supply, reserve)?,
            _ => U256::zero(),
        };

        Ok(BurnLeg {
            token: token.id(),
            amount,
            redeemable: plan.whole_amount,
            residual: plan.leftover,
            residual_lp,
            item_count: Some(plan.item_count),
        })
    }

    /// Underlying amounts, USD value and live incentives of a position
    pub fn value_position(pool: &Pool, position: &UserPosition, now: u64) -> Result<PositionValue> {
        let total_lp = position.total_lp();
        let total_supply = pool.total_supply;

        let amount0 = Self::tokens_for_lp(total_lp, pool.reserve0, total_supply)?;
        let amount1 = Self::tokens_for_lp(total_lp, pool.reserve1, total_supply)?;
        let share_of_pool = if total_supply.is_zero() {
            Fraction::ZERO
        } else {
            ratio_to_fraction(U512::from(total_lp), U512::from(total_supply))?
        };

        let value_usd = match (pool.token0.price_usd(), pool.token1.price_usd()) {
            (Some(price0), Some(price1)) => {
                let value0 = units_to_decimal(amount0, pool.token0.decimals())?.checked_mul(price0);
                let value1 = units_to_decimal(amount1, pool.token1.decimals())?.checked_mul(price1);
                match (value0, value1) {
                    (Some(v0), Some(v1)) => {
                        Some(v0.checked_add(v1).ok_or(AmmError::Overflow("value_position"))?)
                    }
                    _ => return Err(AmmError::Overflow("value_position")),
                }
            }
            _ => None,
        };

        let active_incentives = pool
            .incentives
            .iter()
            .filter(|incentive| incentive.is_active(now) && position.is_subscribed(incentive.id))
            .map(|incentive| incentive.id)
            .collect();

        Ok(PositionValue {
            total_lp,
            share_of_pool,
            amount0,
            amount1,
            value_usd,
            active_incentives,
        })
    }
}
