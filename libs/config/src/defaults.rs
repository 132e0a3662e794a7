//! Engine defaults
//!
//! Values used when a configuration file leaves a setting out. They are
//! grouped by the engine component that consumes them.

/// Slippage tolerance defaults
pub mod slippage {
    /// Default tolerance when the user has not chosen one (0.5%)
    pub const DEFAULT_TOLERANCE_BPS: u32 = 50;

    /// Lowest tolerance a caller may select (0.1%)
    pub const MIN_TOLERANCE_BPS: u32 = 10;

    /// Highest tolerance a caller may select (49%)
    pub const MAX_TOLERANCE_BPS: u32 = 4_900;
}

/// Transaction deadline defaults
pub mod deadline {
    /// Minutes from quote time until a transaction expires
    pub const DEFAULT_MINUTES: u64 = 20;

    /// Three days
    pub const MAX_MINUTES: u64 = 4_320;
}

/// Route finder defaults
pub mod routing {
    /// Direct pair only
    pub const MAX_HOPS: u8 = 1;

    /// Pools with either reserve below this (base units) are not candidates
    pub const MIN_RESERVE: u64 = 1;
}
