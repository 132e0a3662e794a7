//! Token snapshot model
//!
//! A token is either an ordinary fungible asset or a vault asset whose every
//! `10^decimals` base units redeem exactly one NFT held in escrow. The two
//! variants carry only the fields each one needs.

use crate::common::identifiers::{CollectionAddress, TokenId};
use crate::common::errors::FixedPointError;
use crate::precision::{bounded_decimals, pow10};
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plain fungible token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleToken {
    pub id: TokenId,
    pub symbol: String,
    #[serde(deserialize_with = "bounded_decimals")]
    pub decimals: u8,
    /// Optional USD reference price per whole token
    #[serde(default)]
    pub price_usd: Option<Decimal>,
}

/// Fractional token backed one-per-unit by NFTs of a single collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultToken {
    pub id: TokenId,
    pub symbol: String,
    #[serde(deserialize_with = "bounded_decimals")]
    pub decimals: u8,
    pub collection: CollectionAddress,
    /// Optional USD reference price per whole token (i.e. per item)
    #[serde(default)]
    pub price_usd: Option<Decimal>,
}

/// Token as it appears in a pool snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    Fungible(FungibleToken),
    Vault(VaultToken),
}

impl Token {
    pub fn id(&self) -> TokenId {
        match self {
            Token::Fungible(t) => t.id,
            Token::Vault(t) => t.id,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Token::Fungible(t) => &t.symbol,
            Token::Vault(t) => &t.symbol,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Token::Fungible(t) => t.decimals,
            Token::Vault(t) => t.decimals,
        }
    }

    pub fn price_usd(&self) -> Option<Decimal> {
        match self {
            Token::Fungible(t) => t.price_usd,
            Token::Vault(t) => t.price_usd,
        }
    }

    pub fn is_vault(&self) -> bool {
        matches!(self, Token::Vault(_))
    }

    /// Base units per whole token (`10^decimals`)
    ///
    /// For a vault token this is also the base units redeemable for one NFT.
    pub fn unit(&self) -> Result<U256, FixedPointError> {
        pow10(self.decimals())
    }

    /// Vault view of this token, if it is one
    pub fn as_vault(&self) -> Option<&VaultToken> {
        match self {
            Token::Vault(v) => Some(v),
            Token::Fungible(_) => None,
        }
    }
}
