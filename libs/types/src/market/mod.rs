//! Read-only market snapshots supplied by the reserve/metadata provider

pub mod incentive;
pub mod pool;
pub mod position;
pub mod token;

pub use incentive::Incentive;
pub use pool::{Pool, PoolSide};
pub use position::UserPosition;
pub use token::{FungibleToken, Token, VaultToken};
