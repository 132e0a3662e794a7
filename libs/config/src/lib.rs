//! # Vaultswap Engine Configuration
//!
//! This crate replaces process-wide settings (default slippage, default
//! deadline, vault leftover handling) with an explicit [`EngineConfig`] that
//! callers load once and pass into every engine call.
//!
//! ## Features
//!
//! - **Layered Loading**: base TOML file, environment overlay, `VAULTSWAP__` env vars
//! - **Validation**: slippage bounds, deadline bounds and hop limits checked at load time
//! - **Defaults**: every setting has a documented default in [`defaults`]
//!
//! ## Usage
//!
//! ```rust
//! use config::{EngineConfig, LeftoverPolicy};
//!
//! let config = EngineConfig::from_toml_str(r#"
//! [slippage]
//! default_tolerance = "0.01"
//!
//! [vault]
//! leftover_policy = "keep"
//! "#).unwrap();
//!
//! assert_eq!(config.vault.leftover_policy, LeftoverPolicy::Keep);
//! assert_eq!(config.deadline.default_minutes, 20);
//! ```

pub mod defaults;
pub mod engine_config;

// Re-export commonly used types
pub use engine_config::{
    load_config, ConfigError, DeadlineConfig, EngineConfig, LeftoverPolicy, RoutingConfig,
    SlippageConfig, VaultConfig,
};
