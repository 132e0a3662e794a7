//! Whole-unit rounding for vault-backed tokens
//!
//! One vault unit (`10^decimals` base units) redeems exactly one NFT. Amounts
//! headed for NFT selection must be whole units; whatever is left below one
//! unit is reported as a leftover and can be quoted into the paired token.

use crate::error::{AmmError, Result};
use crate::math::div_ceil;
use crate::quote_math::QuoteMath;
use serde::{Deserialize, Serialize};
use types::precision::{pow10, u256_dec_str};
use types::{Fraction, TokenId, VaultToken, U256};

/// Side of the trade a vault leg sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegDirection {
    /// The user deposits NFTs; item count rounds up
    Input,
    /// The user redeems NFTs; item count rounds down
    Output,
}

/// NFT-level plan for one vault side of a trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultLeg {
    pub token: TokenId,
    pub direction: LegDirection,
    /// Amount the quote resolved to
    #[serde(with = "u256_dec_str")]
    pub raw_amount: U256,
    /// `item_count` whole units
    #[serde(with = "u256_dec_str")]
    pub whole_amount: U256,
    pub item_count: u64,
    /// Gap between `raw_amount` and `whole_amount`, if any
    #[serde(default, with = "u256_dec_str::option", skip_serializing_if = "Option::is_none")]
    pub leftover: Option<U256>,
    /// Leftover quoted into the paired token, when conversion is enabled
    #[serde(default, with = "u256_dec_str::option", skip_serializing_if = "Option::is_none")]
    pub leftover_converted: Option<U256>,
}

impl VaultLeg {
    /// Fail unless the user picked exactly the required number of NFTs
    ///
    /// `None` means no selection has been made yet and always passes.
    pub fn check_selection(&self, selected: Option<u64>) -> Result<()> {
        match selected {
            Some(selected) if selected != self.item_count => Err(AmmError::ItemCountMismatch {
                selected,
                required: self.item_count,
            }),
            _ => Ok(()),
        }
    }
}

pub struct VaultMath;

impl VaultMath {
    /// `floor(amount / 10^decimals) * 10^decimals`
    pub fn floor_to_unit(amount: U256, decimals: u8) -> Result<U256> {
        let unit = pow10(decimals)?;
        Ok(amount / unit * unit)
    }

    /// Smallest whole-unit amount covering `amount`
    pub fn ceil_to_unit(amount: U256, decimals: u8) -> Result<U256> {
        let unit = pow10(decimals)?;
        div_ceil(amount, unit)?
            .checked_mul(unit)
            .ok_or(AmmError::Overflow("ceil_to_unit"))
    }

    pub fn is_whole(amount: U256, decimals: u8) -> Result<bool> {
        Ok((amount % pow10(decimals)?).is_zero())
    }

    /// Part of `amount` below one whole unit
    pub fn leftover(amount: U256, decimals: u8) -> Result<U256> {
        Ok(amount % pow10(decimals)?)
    }

    /// NFTs needed for `amount`: rounded up when depositing, down when redeeming
    pub fn required_items(amount: U256, decimals: u8, direction: LegDirection) -> Result<u64> {
        let unit = pow10(decimals)?;
        let count = match direction {
            LegDirection::Input => div_ceil(amount, unit)?,
            LegDirection::Output => amount / unit,
        };
        if count > U256::from(u64::MAX) {
            return Err(AmmError::Overflow("required_items"));
        }
        Ok(count.as_u64())
    }

    /// Item count, whole amount and leftover for one vault leg
    pub fn plan_leg(vault: &VaultToken, raw_amount: U256, direction: LegDirection) -> Result<VaultLeg> {
        let item_count = Self::required_items(raw_amount, vault.decimals, direction)?;
        let whole_amount = U256::from(item_count)
            .checked_mul(pow10(vault.decimals)?)
            .ok_or(AmmError::Overflow("plan_leg"))?;
        // Input: whole >= raw, the excess comes back to the user.
        // Output: whole <= raw, the dust stays behind as fungible vault tokens.
        let leftover = match direction {
            LegDirection::Input => whole_amount - raw_amount,
            LegDirection::Output => raw_amount - whole_amount,
        };

        Ok(VaultLeg {
            token: vault.id,
            direction,
            raw_amount,
            whole_amount,
            item_count,
            leftover: (!leftover.is_zero()).then_some(leftover),
            leftover_converted: None,
        })
    }

    /// Quote a leftover into the paired token
    ///
    /// Returns `None` when the leftover is too small to produce any output.
    pub fn convert_leftover(
        leftover: U256,
        reserve_vault: U256,
        reserve_paired: U256,
        fee: Fraction,
    ) -> Result<Option<U256>> {
        if leftover.is_zero() {
            return Ok(None);
        }
        match QuoteMath::calculate_output_amount(leftover, reserve_vault, reserve_paired, fee) {
            Ok(amount) => Ok(Some(amount)),
            Err(AmmError::NonPositiveOutput) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ChainId, CollectionAddress, FixedPointError, TokenAddress};

    fn vault_token() -> VaultToken {
        VaultToken {
            id: TokenId::new(ChainId::new(1), TokenAddress::new([7u8; 20])),
            symbol: "PUNK".to_string(),
            decimals: 18,
            collection: CollectionAddress::new([8u8; 20]),
            price_usd: None,
        }
    }

    fn two_and_a_half() -> U256 {
        U256::exp10(17) * U256::from(25u64)
    }

    #[test]
    fn test_floor_and_ceil() {
        assert_eq!(
            VaultMath::floor_to_unit(two_and_a_half(), 18).unwrap(),
            U256::exp10(18) * U256::from(2u64)
        );
        assert_eq!(
            VaultMath::ceil_to_unit(two_and_a_half(), 18).unwrap(),
            U256::exp10(18) * U256::from(3u64)
        );
        assert_eq!(
            VaultMath::leftover(two_and_a_half(), 18).unwrap(),
            U256::exp10(17) * U256::from(5u64)
        );
        assert!(!VaultMath::is_whole(two_and_a_half(), 18).unwrap());
        assert!(VaultMath::is_whole(U256::exp10(18), 18).unwrap());
    }

    #[test]
    fn test_unsupported_precision_is_an_error() {
        let precision = AmmError::InvalidAmount(FixedPointError::UnsupportedPrecision { decimals: 80, max: 36 });
        assert_eq!(VaultMath::floor_to_unit(U256::from(5u64), 80), Err(precision.clone()));
        assert_eq!(VaultMath::is_whole(U256::from(5u64), 80), Err(precision.clone()));
        assert_eq!(
            VaultMath::required_items(U256::from(5u64), 80, LegDirection::Output),
            Err(precision.clone())
        );

        let mut wide = vault_token();
        wide.decimals = 80;
        assert_eq!(VaultMath::plan_leg(&wide, U256::from(5u64), LegDirection::Input), Err(precision));
    }

    #[test]
    fn test_leg_serde_keeps_decimal_strings() {
        let leg = VaultMath::plan_leg(&vault_token(), two_and_a_half(), LegDirection::Output).unwrap();
        let json = serde_json::to_value(&leg).unwrap();
        assert_eq!(json["leftover"], "500000000000000000");
        assert!(json.get("leftover_converted").is_none());

        let back: VaultLeg = serde_json::from_value(json).unwrap();
        assert_eq!(back, leg);
    }

    #[test]
    fn test_required_items_by_direction() {
        assert_eq!(VaultMath::required_items(two_and_a_half(), 18, LegDirection::Input).unwrap(), 3);
        assert_eq!(VaultMath::required_items(two_and_a_half(), 18, LegDirection::Output).unwrap(), 2);
        assert_eq!(VaultMath::required_items(U256::exp10(18), 18, LegDirection::Input).unwrap(), 1);
    }

    #[test]
    fn test_plan_output_leg() {
        let leg = VaultMath::plan_leg(&vault_token(), two_and_a_half(), LegDirection::Output).unwrap();
        assert_eq!(leg.item_count, 2);
        assert_eq!(leg.whole_amount, U256::exp10(18) * U256::from(2u64));
        assert_eq!(leg.leftover, Some(U256::exp10(17) * U256::from(5u64)));
        assert!(leg.leftover_converted.is_none());
    }

    #[test]
    fn test_plan_input_leg() {
        let leg = VaultMath::plan_leg(&vault_token(), two_and_a_half(), LegDirection::Input).unwrap();
        assert_eq!(leg.item_count, 3);
        assert_eq!(leg.leftover, Some(U256::exp10(17) * U256::from(5u64)));

        let whole = VaultMath::plan_leg(&vault_token(), U256::exp10(18), LegDirection::Input).unwrap();
        assert_eq!(whole.leftover, None);
    }

    #[test]
    fn test_selection_check() {
        let leg = VaultMath::plan_leg(&vault_token(), two_and_a_half(), LegDirection::Input).unwrap();
        assert!(leg.check_selection(None).is_ok());
        assert!(leg.check_selection(Some(3)).is_ok());
        assert_eq!(
            leg.check_selection(Some(2)),
            Err(AmmError::ItemCountMismatch { selected: 2, required: 3 })
        );
    }

    #[test]
    fn test_convert_leftover() {
        let converted = VaultMath::convert_leftover(
            U256::from(100u64),
            U256::from(1_000u64),
            U256::from(1_000u64),
            Fraction::from_bps(30),
        )
        .unwrap();
        assert_eq!(converted, Some(U256::from(90u64)));

        let dust = VaultMath::convert_leftover(
            U256::one(),
            U256::from(1_000_000u64),
            U256::from(1_000u64),
            Fraction::from_bps(30),
        )
        .unwrap();
        assert_eq!(dust, None);
    }
}
