//! Pool trait definitions for a unified quoting interface

use crate::error::{AmmError, Result};
use crate::quote_math::QuoteMath;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::{Fraction, Pool, PoolSide, Token, TokenId, U256};

/// Which amount the user fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    /// Input fixed, output solved for
    ExactIn,
    /// Output fixed, input solved for
    ExactOut,
}

/// Pool classification by vault backing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Neither side is vault-backed
    Fungible,
    /// Exactly one side is vault-backed
    FungibleVault,
    /// Both sides are vault-backed
    VaultVault,
}

impl PoolKind {
    pub fn of(pool: &Pool) -> Self {
        if pool.is_vault_vault() {
            PoolKind::VaultVault
        } else if pool.has_vault_side() {
            PoolKind::FungibleVault
        } else {
            PoolKind::Fungible
        }
    }
}

/// Unified pool interface for quoting in one direction
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: U256) -> Result<U256>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: U256) -> Result<U256>;

    /// Current `(reserve_in, reserve_out)`
    fn get_liquidity(&self) -> (U256, U256);

    /// Total fee charged to the taker
    fn get_fee(&self) -> Fraction;

    /// Price impact of a resolved trade against the current reserves
    fn get_price_impact(&self, amount_in: U256, amount_out: U256) -> Result<Fraction> {
        let (reserve_in, reserve_out) = self.get_liquidity();
        QuoteMath::calculate_price_impact(amount_in, amount_out, reserve_in, reserve_out)
    }
}

/// A pool snapshot viewed from `token_in` towards the other token
#[derive(Debug, Clone, Copy)]
pub struct DirectedPool<'a> {
    pool: &'a Pool,
    side_in: PoolSide,
}

impl<'a> DirectedPool<'a> {
    pub fn new(pool: &'a Pool, token_in: TokenId) -> Result<Self> {
        let side_in = pool
            .side_of(token_in)
            .ok_or(AmmError::UnknownToken(token_in))?;
        Ok(Self { pool, side_in })
    }

    pub fn from_side(pool: &'a Pool, side_in: PoolSide) -> Self {
        Self { pool, side_in }
    }

    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    pub fn token_in(&self) -> &'a Token {
        self.pool.token(self.side_in)
    }

    pub fn token_out(&self) -> &'a Token {
        self.pool.token(self.side_in.opposite())
    }

    pub fn reserve_in(&self) -> U256 {
        self.pool.reserve(self.side_in)
    }

    pub fn reserve_out(&self) -> U256 {
        self.pool.reserve(self.side_in.opposite())
    }

    /// Same pool, opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            pool: self.pool,
            side_in: self.side_in.opposite(),
        }
    }

    /// Mid price of one whole `token_in` in `token_out`
    pub fn spot_price(&self) -> Result<Decimal> {
        QuoteMath::spot_price(
            self.reserve_in(),
            self.token_in().decimals(),
            self.reserve_out(),
            self.token_out().decimals(),
        )
    }
}

/// Orientation helper for pool snapshots
pub trait PoolExt {
    /// View the pool as a trade from `token_in` to its pair
    fn orient(&self, token_in: TokenId) -> Result<DirectedPool<'_>>;
}

impl PoolExt for Pool {
    fn orient(&self, token_in: TokenId) -> Result<DirectedPool<'_>> {
        DirectedPool::new(self, token_in)
    }
}

impl AmmPool for DirectedPool<'_> {
    fn get_amount_out(&self, amount_in: U256) -> Result<U256> {
        QuoteMath::calculate_output_amount(
            amount_in,
            self.reserve_in(),
            self.reserve_out(),
            self.pool.swap_fee(),
        )
    }

    fn get_amount_in(&self, amount_out: U256) -> Result<U256> {
        QuoteMath::calculate_input_amount(
            amount_out,
            self.reserve_in(),
            self.reserve_out(),
            self.pool.swap_fee(),
        )
    }

    fn get_liquidity(&self) -> (U256, U256) {
        (self.reserve_in(), self.reserve_out())
    }

    fn get_fee(&self) -> Fraction {
        self.pool.swap_fee()
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use types::{
        ChainId, CollectionAddress, FungibleToken, Fraction, Pool, PoolAddress, Token, TokenAddress,
        TokenId, VaultToken, U256,
    };

    pub fn fungible(n: u8, decimals: u8) -> Token {
        let mut address = [0u8; 20];
        address[19] = n;
        Token::Fungible(FungibleToken {
            id: TokenId::new(ChainId::new(1), TokenAddress::new(address)),
            symbol: format!("FT{}", n),
            decimals,
            price_usd: None,
        })
    }

    pub fn vault(n: u8, decimals: u8) -> Token {
        let mut address = [0u8; 20];
        address[19] = n;
        Token::Vault(VaultToken {
            id: TokenId::new(ChainId::new(1), TokenAddress::new(address)),
            symbol: format!("VT{}", n),
            decimals,
            collection: CollectionAddress::new([n; 20]),
            price_usd: None,
        })
    }

    pub fn pool(token0: Token, token1: Token, reserve0: u128, reserve1: u128, fee_bps: u32) -> Pool {
        let mut address = [0xeeu8; 20];
        address[0] = token0.id().address.0[19];
        address[1] = token1.id().address.0[19];
        Pool {
            address: PoolAddress::new(address),
            token0,
            token1,
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
            total_supply: U256::from(reserve0.min(reserve1)),
            lp_fee: Fraction::from_bps(fee_bps),
            protocol_fee: None,
            royalty_fee: None,
            incentives: Vec::new(),
        }
    }
}
