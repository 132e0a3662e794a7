//! Pool snapshot model
//!
//! A pool pairs two tokens with integer reserves and an LP supply. Snapshots
//! are read-only: the engine derives quotes from them and never writes back.

use crate::common::errors::ValidationError;
use crate::common::fixed_point::Fraction;
use crate::common::identifiers::{PoolAddress, TokenId};
use crate::market::incentive::Incentive;
use crate::market::token::Token;
use crate::precision::{u256_dec_str, MAX_DECIMALS};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Which side of a pool a token occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolSide {
    Token0,
    Token1,
}

impl PoolSide {
    pub fn opposite(self) -> Self {
        match self {
            PoolSide::Token0 => PoolSide::Token1,
            PoolSide::Token1 => PoolSide::Token0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub address: PoolAddress,
    pub token0: Token,
    pub token1: Token,
    #[serde(with = "u256_dec_str")]
    pub reserve0: U256,
    #[serde(with = "u256_dec_str")]
    pub reserve1: U256,
    /// Outstanding LP shares; zero only before the first deposit
    #[serde(with = "u256_dec_str")]
    pub total_supply: U256,
    /// Fee retained by liquidity providers
    pub lp_fee: Fraction,
    #[serde(default)]
    pub protocol_fee: Option<Fraction>,
    /// Creator royalty charged on trades touching a vault side
    #[serde(default)]
    pub royalty_fee: Option<Fraction>,
    #[serde(default)]
    pub incentives: Vec<Incentive>,
}

impl Pool {
    /// Reject snapshots that pair a token with itself or carry an unsupported precision
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token0.id() == self.token1.id() {
            return Err(ValidationError::IdenticalTokens);
        }
        for token in [&self.token0, &self.token1] {
            if token.decimals() > MAX_DECIMALS {
                return Err(ValidationError::UnsupportedDecimals {
                    symbol: token.symbol().to_string(),
                    decimals: token.decimals(),
                });
            }
        }
        Ok(())
    }

    pub fn token(&self, side: PoolSide) -> &Token {
        match side {
            PoolSide::Token0 => &self.token0,
            PoolSide::Token1 => &self.token1,
        }
    }

    pub fn reserve(&self, side: PoolSide) -> U256 {
        match side {
            PoolSide::Token0 => self.reserve0,
            PoolSide::Token1 => self.reserve1,
        }
    }

    /// Side occupied by `token`, if the pool holds it
    pub fn side_of(&self, token: TokenId) -> Option<PoolSide> {
        if self.token0.id() == token {
            Some(PoolSide::Token0)
        } else if self.token1.id() == token {
            Some(PoolSide::Token1)
        } else {
            None
        }
    }

    pub fn reserve_of(&self, token: TokenId) -> Option<U256> {
        self.side_of(token).map(|side| self.reserve(side))
    }

    /// True when the pool directly pairs `a` with `b` (either orientation)
    pub fn pairs(&self, a: TokenId, b: TokenId) -> bool {
        match self.side_of(a) {
            Some(side) => self.token(side.opposite()).id() == b,
            None => false,
        }
    }

    /// Both sides are vault-backed
    pub fn is_vault_vault(&self) -> bool {
        self.token0.is_vault() && self.token1.is_vault()
    }

    pub fn has_vault_side(&self) -> bool {
        self.token0.is_vault() || self.token1.is_vault()
    }

    /// Total fee charged to a taker: LP + protocol + royalty
    pub fn swap_fee(&self) -> Fraction {
        self.lp_fee
            .saturating_add(self.protocol_fee.unwrap_or(Fraction::ZERO))
            .saturating_add(self.royalty_fee.unwrap_or(Fraction::ZERO))
    }

    /// Liquidity has been seeded
    pub fn is_initialized(&self) -> bool {
        !self.total_supply.is_zero()
    }
}
