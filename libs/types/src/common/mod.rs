//! Shared primitives: errors, fixed-point fractions and typed identifiers

pub mod errors;
pub mod fixed_point;
pub mod identifiers;
