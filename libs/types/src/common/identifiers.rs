//! # Typed Identifiers
//!
//! Zero-cost wrappers that keep token, pool, collection and incentive
//! identities from being mixed up in function signatures.
//!
//! ```rust
//! use types::{ChainId, TokenAddress};
//!
//! let weth = TokenAddress::from_hex("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").unwrap();
//! let mainnet = ChainId::new(1);
//! assert_eq!(weth.to_hex(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
//! assert!(!mainnet.is_null());
//! ```

use crate::common::errors::ValidationError;

/// Macro for generating typed byte-array wrappers
///
/// Each wrapper is `repr(transparent)`, serializes as a `0x`-prefixed hex
/// string and parses from one.
#[macro_export]
macro_rules! define_typed_wrapper {
    (
        $(#[$meta:meta])*
        $name:ident, $len:expr
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default
        )]
        #[repr(transparent)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Create a new typed wrapper
            #[inline(always)]
            pub const fn new(inner: [u8; $len]) -> Self {
                Self(inner)
            }

            /// Extract the inner value by value
            #[inline(always)]
            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Parse from a hex string, with or without `0x` prefix
            pub fn from_hex(s: &str) -> Result<Self, $crate::common::errors::ValidationError> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
                    $crate::common::errors::ValidationError::InvalidAddress {
                        input: s.to_string(),
                        expected: $len,
                    }
                })?;
                Ok(Self(bytes))
            }

            /// Lowercase `0x`-prefixed hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::common::errors::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline(always)]
            fn from(inner: [u8; $len]) -> Self {
                Self(inner)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Macro for generating zero-cost typed ID wrappers over `u64`
#[macro_export]
macro_rules! define_typed_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new typed ID
            #[inline(always)]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Create a new typed ID, rejecting zero
            #[inline]
            pub fn new_validated(id: u64) -> Result<Self, $crate::common::errors::ValidationError> {
                if id == 0 {
                    return Err($crate::common::errors::ValidationError::NullId);
                }
                Ok(Self(id))
            }

            #[inline(always)]
            pub const fn inner(&self) -> u64 {
                self.0
            }

            #[inline(always)]
            pub const fn is_null(&self) -> bool {
                self.0 == 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            #[inline(always)]
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_typed_id!(
    /// EVM chain identifier
    ChainId
);

define_typed_id!(
    /// Staking incentive program identifier
    IncentiveId
);

define_typed_wrapper!(
    /// Token contract address (20 bytes)
    TokenAddress, 20
);

define_typed_wrapper!(
    /// Pool (pair) contract address (20 bytes)
    ///
    /// Doubles as the LP token address since each pair mints its own shares.
    PoolAddress, 20
);

define_typed_wrapper!(
    /// NFT collection held in escrow by a vault token (20 bytes)
    CollectionAddress, 20
);

/// Chain-qualified token identity
///
/// The same contract address on two chains is two different tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct TokenId {
    pub chain_id: ChainId,
    pub address: TokenAddress,
}

impl TokenId {
    pub const fn new(chain_id: ChainId, address: TokenAddress) -> Self {
        Self { chain_id, address }
    }

    /// Parse `address` as hex on the given chain
    pub fn parse(chain_id: u64, address: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            chain_id: ChainId::new(chain_id),
            address: TokenAddress::from_hex(address)?,
        })
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.address, self.chain_id.0)
    }
}
