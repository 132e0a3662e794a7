//! Precision Handling for Token Base Units
//!
//! Collaborators hand the engine reserves, supplies and user amounts as
//! decimal strings. This module converts them to `U256` base units at the
//! token's native precision and back, without ever passing through floating
//! point.
//!
//! ## Critical Rules
//!
//! 1. **NO FLOATING POINT**: amounts are integers in the token's smallest unit
//! 2. **Preserve Native Precision**: 18-decimal vault tokens stay at 18 decimals
//! 3. **Reject, don't round**: more fractional digits than the token supports is an error
//!
//! ## Example Usage
//!
//! ```rust
//! use types::precision::{format_units, parse_units};
//!
//! let amount = parse_units("2.5", 18).unwrap();
//! assert_eq!(amount.to_string(), "2500000000000000000");
//! assert_eq!(format_units(amount, 18), "2.5");
//! ```

use crate::common::errors::FixedPointError;
use primitive_types::U256;

/// Largest supported token precision; keeps `10^decimals * 10^decimals` inside `U256`
pub const MAX_DECIMALS: u8 = 36;

/// `10^decimals` as `U256`, for precisions up to [`MAX_DECIMALS`]
pub fn pow10(decimals: u8) -> Result<U256, FixedPointError> {
    if decimals > MAX_DECIMALS {
        return Err(FixedPointError::UnsupportedPrecision {
            decimals,
            max: MAX_DECIMALS,
        });
    }
    Ok(U256::exp10(decimals as usize))
}

/// Deserialize a token precision, rejecting anything above [`MAX_DECIMALS`]
pub fn bounded_decimals<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let decimals = <u8 as serde::Deserialize>::deserialize(deserializer)?;
    pow10(decimals).map_err(serde::de::Error::custom)?;
    Ok(decimals)
}

/// Parse a human decimal string ("1.25") into base units at `decimals` precision
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, FixedPointError> {
    let s = input.trim();
    let invalid = || FixedPointError::InvalidDecimal {
        input: input.to_string(),
    };

    if s.starts_with('-') {
        return Err(FixedPointError::Negative {
            input: input.to_string(),
        });
    }
    let unit = pow10(decimals)?;

    let (whole, fractional) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && fractional.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fractional.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    // Trailing zeros beyond the token precision carry no value
    let fractional = fractional.trim_end_matches('0');
    if fractional.len() > decimals as usize {
        return Err(FixedPointError::PrecisionLoss {
            input: input.to_string(),
            decimals,
        });
    }

    let overflow = || FixedPointError::Overflow {
        input: input.to_string(),
    };

    let whole_units = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| overflow())?
    };

    let fractional_units = if fractional.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fractional, width = decimals as usize);
        U256::from_dec_str(&padded).map_err(|_| overflow())?
    };

    whole_units
        .checked_mul(unit)
        .and_then(|w| w.checked_add(fractional_units))
        .ok_or_else(overflow)
}

/// Render base units as a human decimal string, trimming trailing zeros
///
/// For display only. `format_units(1_500_000, 6) == "1.5"`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    // A unit wider than U256 exceeds every amount
    let (whole, fractional) = match U256::from(10u8).checked_pow(U256::from(decimals)) {
        Some(unit) => (amount / unit, amount % unit),
        None => (U256::zero(), amount),
    };
    if fractional.is_zero() {
        return whole.to_string();
    }

    let padded = format!(
        "{:0>width$}",
        fractional.to_string(),
        width = decimals as usize
    );
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

/// Serde adapter for `U256` fields carried as decimal-integer strings
///
/// Reserve providers emit `"1000000000000000000000"` style strings; small
/// values may arrive as JSON numbers, which are accepted on input.
pub mod u256_dec_str {
    use primitive_types::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Str(s) => U256::from_dec_str(s.trim()).map_err(serde::de::Error::custom),
            Raw::Num(n) => Ok(U256::from(n)),
        }
    }

    /// Same wire format for optional fields; pair with `#[serde(default)]`
    pub mod option {
        use primitive_types::U256;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapped(#[serde(with = "super")] U256);

            Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(value)| value))
        }
    }
}
