//! Staking incentive programs
//!
//! An incentive streams a fixed reward budget to staked LP tokens between two
//! timestamps. `remaining` only ever decreases as rewards are claimed.

use crate::common::fixed_point::Fraction;
use crate::common::identifiers::IncentiveId;
use crate::market::token::Token;
use crate::precision::u256_dec_str;
use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    pub id: IncentiveId,
    pub reward_token: Token,
    /// Unix seconds
    pub start_time: u64,
    /// Unix seconds
    pub end_time: u64,
    #[serde(with = "u256_dec_str")]
    pub total_reward: U256,
    #[serde(with = "u256_dec_str")]
    pub remaining_reward: U256,
}

impl Incentive {
    /// Streaming between `start_time` (inclusive) and `end_time` (exclusive)
    pub fn is_active(&self, now: u64) -> bool {
        now >= self.start_time && now < self.end_time
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now >= self.end_time
    }

    pub fn duration_seconds(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Seconds left in the program, zero once ended
    pub fn remaining_seconds(&self, now: u64) -> u64 {
        self.end_time.saturating_sub(now.max(self.start_time))
    }

    /// Base units emitted per second over the full program
    pub fn emission_per_second(&self) -> U256 {
        match self.duration_seconds() {
            0 => U256::zero(),
            secs => self.total_reward / U256::from(secs),
        }
    }

    /// Unclaimed share of the total budget, in basis points
    pub fn remaining_bps(&self) -> u32 {
        if self.total_reward.is_zero() {
            return 0;
        }
        let remaining = self.remaining_reward.min(self.total_reward);
        // remaining <= total, so the ratio fits comfortably in u32
        (remaining * U256::from(10_000u32) / self.total_reward).low_u32()
    }

    /// Unclaimed share of the total budget
    pub fn remaining_fraction(&self) -> Fraction {
        if self.total_reward.is_zero() {
            return Fraction::ZERO;
        }
        let remaining = self.remaining_reward.min(self.total_reward);
        let raw = remaining.full_mul(U256::from(Fraction::SCALE)) / U512::from(self.total_reward);
        Fraction::from_raw(raw.low_u64())
    }
}
