//! Engine Configuration Module
//!
//! Provides configuration loading for the pricing engine. Settings come from a
//! TOML file, an optional environment-specific overlay and `VAULTSWAP_`
//! environment variables, and are validated before use. The resulting
//! [`EngineConfig`] is passed explicitly into every engine call.

use crate::defaults;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use types::precision::u256_dec_str;
use types::{Fraction, U256};

/// Semantic validation failures for a loaded configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("slippage bounds must satisfy {hard_min} <= min ({min}) <= default ({default}) <= max ({max}) <= {hard_max}")]
    SlippageBounds {
        min: Fraction,
        default: Fraction,
        max: Fraction,
        hard_min: Fraction,
        hard_max: Fraction,
    },

    #[error("deadline default {default} minutes must be between 1 and max {max}")]
    DeadlineBounds { default: u64, max: u64 },

    #[error("routing with {0} hops is not supported; only direct pairs (1 hop)")]
    UnsupportedHops(u8),
}

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub slippage: SlippageConfig,
    pub deadline: DeadlineConfig,
    pub vault: VaultConfig,
    pub routing: RoutingConfig,
}

/// Slippage tolerance settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlippageConfig {
    pub default_tolerance: Fraction,
    pub min_tolerance: Fraction,
    pub max_tolerance: Fraction,
}

/// Transaction deadline settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeadlineConfig {
    pub default_minutes: u64,
    pub max_minutes: u64,
}

/// What to do with vault amounts below one whole item
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    /// Quote the leftover into the paired asset
    #[default]
    SwapToPaired,
    /// Report the leftover untouched
    Keep,
}

/// Vault leg settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct VaultConfig {
    pub leftover_policy: LeftoverPolicy,
    /// Reject exact-out vault legs that are not a whole number of items
    pub reject_fractional_exact_out: bool,
}

/// Route finder settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    pub max_hops: u8,
    #[serde(with = "u256_dec_str")]
    pub min_reserve: U256,
}

impl Default for SlippageConfig {
    fn default() -> Self {
        Self {
            default_tolerance: Fraction::from_bps(defaults::slippage::DEFAULT_TOLERANCE_BPS),
            min_tolerance: Fraction::from_bps(defaults::slippage::MIN_TOLERANCE_BPS),
            max_tolerance: Fraction::from_bps(defaults::slippage::MAX_TOLERANCE_BPS),
        }
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            default_minutes: defaults::deadline::DEFAULT_MINUTES,
            max_minutes: defaults::deadline::MAX_MINUTES,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            leftover_policy: LeftoverPolicy::default(),
            reject_fractional_exact_out: true,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_hops: defaults::routing::MAX_HOPS,
            min_reserve: U256::from(defaults::routing::MIN_RESERVE),
        }
    }
}

impl SlippageConfig {
    /// Clamp a caller-chosen tolerance into `[min_tolerance, max_tolerance]`
    pub fn clamp(&self, tolerance: Fraction) -> Fraction {
        tolerance.max(self.min_tolerance).min(self.max_tolerance)
    }

    /// The caller's tolerance (clamped) or the configured default
    pub fn resolve(&self, requested: Option<Fraction>) -> Fraction {
        match requested {
            Some(tolerance) => self.clamp(tolerance),
            None => self.default_tolerance,
        }
    }
}

impl DeadlineConfig {
    /// The caller's deadline in minutes (clamped to `1..=max_minutes`) or the default
    pub fn resolve(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(minutes) => minutes.clamp(1, self.max_minutes.max(1)),
            None => self.default_minutes,
        }
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    ///
    /// Sources, later overriding earlier:
    /// 1. `base_path` (default `config/engine.toml`), optional when absent
    /// 2. `<base dir>/environments/<environment>.toml` if it exists
    /// 3. `VAULTSWAP__<SECTION>__<KEY>` environment variables
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new("config/engine.toml"));

        let mut builder = Config::builder().add_source(File::from(base).required(base_path.is_some()));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base
                .parent()
                .map(|dir| dir.join("environments"))
                .unwrap_or_else(|| PathBuf::from("environments"))
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("VAULTSWAP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid engine configuration")?;
        debug!(?config, "engine configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }

    /// Render as TOML, e.g. to seed a config file
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let hard_min = Fraction::from_bps(defaults::slippage::MIN_TOLERANCE_BPS);
        let hard_max = Fraction::from_bps(defaults::slippage::MAX_TOLERANCE_BPS);
        let s = &self.slippage;
        if !(hard_min <= s.min_tolerance
            && s.min_tolerance <= s.default_tolerance
            && s.default_tolerance <= s.max_tolerance
            && s.max_tolerance <= hard_max)
        {
            return Err(ConfigError::SlippageBounds {
                min: s.min_tolerance,
                default: s.default_tolerance,
                max: s.max_tolerance,
                hard_min,
                hard_max,
            });
        }

        let d = &self.deadline;
        if d.default_minutes == 0 || d.default_minutes > d.max_minutes {
            return Err(ConfigError::DeadlineBounds {
                default: d.default_minutes,
                max: d.max_minutes,
            });
        }

        if self.routing.max_hops != 1 {
            return Err(ConfigError::UnsupportedHops(self.routing.max_hops));
        }

        Ok(())
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<EngineConfig> {
    EngineConfig::load(None, environment)
}
