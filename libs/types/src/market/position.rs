//! A user's LP holdings in one pool

use crate::common::identifiers::{IncentiveId, PoolAddress};
use crate::precision::u256_dec_str;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPosition {
    pub pool: PoolAddress,
    /// Unstaked LP tokens held in the wallet
    #[serde(with = "u256_dec_str")]
    pub lp_balance: U256,
    /// LP tokens deposited into the staking contract
    #[serde(with = "u256_dec_str")]
    pub lp_staked: U256,
    #[serde(default)]
    pub subscribed_incentives: BTreeSet<IncentiveId>,
}

impl UserPosition {
    /// Staked plus unstaked LP
    pub fn total_lp(&self) -> U256 {
        self.lp_balance.saturating_add(self.lp_staked)
    }

    pub fn is_subscribed(&self, incentive: IncentiveId) -> bool {
        self.subscribed_incentives.contains(&incentive)
    }

    pub fn is_empty(&self) -> bool {
        self.total_lp().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_lp_combines_staked() {
        let position = UserPosition {
            pool: PoolAddress::new([1u8; 20]),
            lp_balance: U256::from(40u64),
            lp_staked: U256::from(60u64),
            subscribed_incentives: [IncentiveId::new(3)].into_iter().collect(),
        };
        assert_eq!(position.total_lp(), U256::from(100u64));
        assert!(position.is_subscribed(IncentiveId::new(3)));
        assert!(!position.is_subscribed(IncentiveId::new(4)));
        assert!(!position.is_empty());
        assert!(UserPosition::default().is_empty());
    }
}
