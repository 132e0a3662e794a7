//! Fixed-point fraction type for fees, tolerances and price impact
//!
//! Every fractional quantity the engine consumes (LP fee, protocol fee, royalty
//! fee, slippage tolerance) or produces (price impact) is a [`Fraction`]: an
//! unsigned integer scaled by 10^18, so the swap math never touches floating
//! point.
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: values are parsed from decimal strings, never from floats
//! - **Overflow Protection**: checked arithmetic returns `None` instead of wrapping
//! - **Clear Boundaries**: `to_f64` exists for display only

use crate::common::errors::FixedPointError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fraction with 18 decimal places precision
///
/// Scale factor: 1,000,000,000,000,000,000 (10^18)
///
/// Examples:
/// - 0.3% fee = Fraction(3_000_000_000_000_000)
/// - 50% = Fraction(500_000_000_000_000_000)
/// - 1.0 = Fraction(1_000_000_000_000_000_000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fraction(u64);

impl Fraction {
    /// Scale factor for 18 decimal places
    pub const SCALE: u64 = 1_000_000_000_000_000_000;

    /// Number of fractional digits carried
    pub const DECIMALS: u32 = 18;

    /// Zero
    pub const ZERO: Self = Self(0);

    /// One whole (100%)
    pub const ONE: Self = Self(Self::SCALE);

    /// One basis point (0.01%)
    pub const ONE_BASIS_POINT: Self = Self(100_000_000_000_000);

    /// Create from a decimal string with exact parsing
    ///
    /// This is the PRIMARY method for creating fractions from collaborator data
    /// (pool metadata, configuration files, user input).
    ///
    /// # Examples
    /// ```
    /// use types::Fraction;
    ///
    /// let fee = Fraction::from_decimal_str("0.003").unwrap();
    /// assert_eq!(fee, Fraction::from_bps(30));
    /// ```
    pub fn from_decimal_str(s: &str) -> Result<Self, FixedPointError> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| FixedPointError::InvalidDecimal {
            input: s.to_string(),
        })?;
        Self::from_decimal(decimal).map_err(|err| match err {
            FixedPointError::Overflow { .. } => FixedPointError::Overflow {
                input: s.to_string(),
            },
            FixedPointError::Negative { .. } => FixedPointError::Negative {
                input: s.to_string(),
            },
            FixedPointError::PrecisionLoss { decimals, .. } => FixedPointError::PrecisionLoss {
                input: s.to_string(),
                decimals,
            },
            other => other,
        })
    }

    /// Create from a `Decimal`, rejecting negatives and sub-10^-18 digits
    pub fn from_decimal(decimal: Decimal) -> Result<Self, FixedPointError> {
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(FixedPointError::Negative {
                input: decimal.to_string(),
            });
        }
        let normalized = decimal.normalize();
        if normalized.scale() > Self::DECIMALS {
            return Err(FixedPointError::PrecisionLoss {
                input: decimal.to_string(),
                decimals: Self::DECIMALS as u8,
            });
        }

        let scaled = normalized
            .checked_mul(Decimal::from(Self::SCALE))
            .and_then(|v| v.to_u64())
            .ok_or_else(|| FixedPointError::Overflow {
                input: decimal.to_string(),
            })?;
        Ok(Self(scaled))
    }

    /// Create from basis points (30 = 0.3%)
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Self(bps as u64 * Self::ONE_BASIS_POINT.0)
    }

    /// CONVENIENCE method: Create from f64 with safety checks
    ///
    /// Only for values that already went through floating point elsewhere
    /// (e.g. UI sliders). Rounds to the nearest representable value.
    pub fn try_from_f64(value: f64) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite { value });
        }
        if value < 0.0 {
            return Err(FixedPointError::Negative {
                input: value.to_string(),
            });
        }

        let scaled = value * Self::SCALE as f64;
        if scaled > u64::MAX as f64 {
            return Err(FixedPointError::Overflow {
                input: value.to_string(),
            });
        }

        Ok(Self(scaled.round() as u64))
    }

    /// Exact conversion to `Decimal`
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(self.0 as i128, Self::DECIMALS)
    }

    /// Convert to f64 for display or interfacing with floating-point systems
    ///
    /// # Warning
    /// Never feed the result back into swap math.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Get the raw scaled integer value
    #[inline]
    pub const fn raw_value(self) -> u64 {
        self.0
    }

    /// Create from raw scaled integer (advanced usage)
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `1 - self`, or `None` when the fraction exceeds one
    pub fn complement(self) -> Option<Self> {
        Self::SCALE.checked_sub(self.0).map(Self)
    }

    // CHECKED ARITHMETIC

    /// Checked addition - returns None on overflow
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction - returns None on underflow
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    // SATURATING ARITHMETIC

    /// Saturating addition - clamps to max on overflow
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction - clamps to zero on underflow
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

impl FromStr for Fraction {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl Serialize for Fraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.to_decimal().normalize(), serializer)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decimal = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(decimal).map_err(serde::de::Error::custom)
    }
}
