//! Route finding over a pool snapshot
//!
//! Pools are indexed into an adjacency graph keyed by token. A request is
//! resolved by quoting every candidate edge from `token_in` to `token_out`,
//! keeping failed candidates as invalid routes, and selecting the best valid
//! one. Only direct (single-pool) paths are searched.

use crate::error::{AmmError, Result};
use crate::pool_traits::{AmmPool, DirectedPool, TradeType};
use crate::vault_math::{LegDirection, VaultLeg, VaultMath};
use config::{EngineConfig, LeftoverPolicy};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;
use types::{Fraction, Pool, PoolAddress, PoolSide, Token, TokenId, U256};

/// A swap the user wants priced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub token_in: TokenId,
    pub token_out: TokenId,
    /// Fixed input for exact-in, fixed output for exact-out
    pub amount: U256,
    pub trade_type: TradeType,
    /// NFTs the user picked to deposit, when `token_in` is a vault token
    pub selected_items_in: Option<u64>,
    /// NFTs the user picked to redeem, when `token_out` is a vault token
    pub selected_items_out: Option<u64>,
}

impl RouteRequest {
    pub fn exact_in(token_in: TokenId, token_out: TokenId, amount: U256) -> Self {
        Self {
            token_in,
            token_out,
            amount,
            trade_type: TradeType::ExactIn,
            selected_items_in: None,
            selected_items_out: None,
        }
    }

    pub fn exact_out(token_in: TokenId, token_out: TokenId, amount: U256) -> Self {
        Self {
            trade_type: TradeType::ExactOut,
            ..Self::exact_in(token_in, token_out, amount)
        }
    }

    pub fn with_selected_items(mut self, items_in: Option<u64>, items_out: Option<u64>) -> Self {
        self.selected_items_in = items_in;
        self.selected_items_out = items_out;
        self
    }
}

/// A resolved (or rejected) path for a request
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRoute {
    /// Tokens in traversal order, starting with `token_in`
    pub path: Vec<TokenId>,
    /// Pools traversed; empty when no candidate existed
    pub pools: Vec<PoolAddress>,
    pub trade_type: TradeType,
    pub amount_in: U256,
    pub amount_out: U256,
    pub price_impact: Fraction,
    /// Only valid routes may be offered for execution
    pub is_valid: bool,
    pub invalid_reason: Option<AmmError>,
    pub vault_in: Option<VaultLeg>,
    pub vault_out: Option<VaultLeg>,
}

impl SwapRoute {
    fn invalid(request: &RouteRequest, pools: Vec<PoolAddress>, reason: AmmError) -> Self {
        let (amount_in, amount_out) = match request.trade_type {
            TradeType::ExactIn => (request.amount, U256::zero()),
            TradeType::ExactOut => (U256::zero(), request.amount),
        };
        Self {
            path: vec![request.token_in, request.token_out],
            pools,
            trade_type: request.trade_type,
            amount_in,
            amount_out,
            price_impact: Fraction::ZERO,
            is_valid: false,
            invalid_reason: Some(reason),
            vault_in: None,
            vault_out: None,
        }
    }

    pub fn hops(&self) -> usize {
        self.pools.len()
    }

    pub fn token_in(&self) -> Option<TokenId> {
        self.path.first().copied()
    }

    pub fn token_out(&self) -> Option<TokenId> {
        self.path.last().copied()
    }

    /// Preference for best-route selection; `Greater` means `self` wins
    fn rank(&self, other: &Self) -> Ordering {
        let by_amount = match self.trade_type {
            TradeType::ExactIn => self.amount_out.cmp(&other.amount_out),
            TradeType::ExactOut => other.amount_in.cmp(&self.amount_in),
        };
        by_amount.then_with(|| other.price_impact.cmp(&self.price_impact))
    }
}

/// Directed edge: one pool traversed from `side_in`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEdge {
    /// Index into the graph's pool slice
    pub pool: usize,
    pub side_in: PoolSide,
    pub token_out: TokenId,
}

/// Adjacency index of tradeable pools
#[derive(Debug, Clone)]
pub struct PoolGraph<'a> {
    pools: &'a [Pool],
    adjacency: HashMap<TokenId, Vec<PoolEdge>>,
}

impl<'a> PoolGraph<'a> {
    /// Index `pools`, skipping malformed pools and any with a reserve below `min_reserve`
    pub fn build(pools: &'a [Pool], min_reserve: U256) -> Self {
        let mut adjacency: HashMap<TokenId, Vec<PoolEdge>> = HashMap::new();

        for (index, pool) in pools.iter().enumerate() {
            if let Err(e) = pool.validate() {
                debug!(pool = %pool.address, error = %e, "Skipping malformed pool");
                continue;
            }
            let floor = min_reserve.max(U256::one());
            if pool.reserve0 < floor || pool.reserve1 < floor {
                debug!(
                    pool = %pool.address,
                    reserve0 = %pool.reserve0,
                    reserve1 = %pool.reserve1,
                    "Skipping pool below minimum reserve"
                );
                continue;
            }

            for side_in in [PoolSide::Token0, PoolSide::Token1] {
                adjacency
                    .entry(pool.token(side_in).id())
                    .or_default()
                    .push(PoolEdge {
                        pool: index,
                        side_in,
                        token_out: pool.token(side_in.opposite()).id(),
                    });
            }
        }

        Self { pools, adjacency }
    }

    /// Edges leaving `token`
    pub fn edges_from(&self, token: TokenId) -> &[PoolEdge] {
        self.adjacency.get(&token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Directed pools that swap `token_in` straight into `token_out`
    pub fn direct_candidates(&self, token_in: TokenId, token_out: TokenId) -> Vec<DirectedPool<'a>> {
        self.edges_from(token_in)
            .iter()
            .filter(|edge| edge.token_out == token_out)
            .map(|edge| DirectedPool::from_side(&self.pools[edge.pool], edge.side_in))
            .collect()
    }

    /// Number of pools admitted into the graph
    pub fn pool_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}

/// Best-route search for swap requests
pub struct RouteFinder<'a> {
    graph: PoolGraph<'a>,
    config: &'a EngineConfig,
}

impl<'a> RouteFinder<'a> {
    pub fn new(pools: &'a [Pool], config: &'a EngineConfig) -> Self {
        Self {
            graph: PoolGraph::build(pools, config.routing.min_reserve),
            config,
        }
    }

    pub fn graph(&self) -> &PoolGraph<'a> {
        &self.graph
    }

    /// Quote every candidate pool for `request`
    ///
    /// Candidates that fail are returned as invalid routes carrying the reason.
    pub fn evaluate_candidates(&self, request: &RouteRequest) -> Vec<SwapRoute> {
        self.graph
            .direct_candidates(request.token_in, request.token_out)
            .into_iter()
            .map(|view| {
                self.evaluate(&view, request).unwrap_or_else(|reason| {
                    debug!(
                        pool = %view.pool().address,
                        reason = %reason,
                        "Route candidate rejected"
                    );
                    SwapRoute::invalid(request, vec![view.pool().address], reason)
                })
            })
            .collect()
    }

    /// Best route for `request`
    ///
    /// Exact-in maximizes output, exact-out minimizes input; ties go to the
    /// lower price impact. When nothing is executable the returned route is
    /// invalid and explains why.
    pub fn find_best_route(&self, request: &RouteRequest) -> SwapRoute {
        if let Err(reason) = self.check_request(request) {
            return SwapRoute::invalid(request, Vec::new(), reason);
        }

        let candidates = self.evaluate_candidates(request);
        if candidates.is_empty() {
            debug!(
                token_in = %request.token_in,
                token_out = %request.token_out,
                "No pool pairs the requested tokens"
            );
            return SwapRoute::invalid(
                request,
                Vec::new(),
                AmmError::NoRoute {
                    token_in: request.token_in,
                    token_out: request.token_out,
                },
            );
        }

        let best = candidates
            .iter()
            .filter(|route| route.is_valid)
            .max_by(|a, b| a.rank(b))
            .cloned();

        match best {
            Some(route) => {
                debug!(
                    pools = ?route.pools,
                    amount_in = %route.amount_in,
                    amount_out = %route.amount_out,
                    price_impact = %route.price_impact,
                    candidates = candidates.len(),
                    "Selected route"
                );
                route
            }
            // Every candidate failed; surface the first failure
            None => candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| SwapRoute::invalid(request, Vec::new(), AmmError::NonPositiveOutput)),
        }
    }

    fn check_request(&self, request: &RouteRequest) -> Result<()> {
        if request.token_in == request.token_out {
            return Err(AmmError::IdenticalTokens);
        }
        if request.amount.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        Ok(())
    }

    fn evaluate(&self, view: &DirectedPool<'_>, request: &RouteRequest) -> Result<SwapRoute> {
        let (amount_in, amount_out) = match request.trade_type {
            TradeType::ExactIn => (request.amount, view.get_amount_out(request.amount)?),
            TradeType::ExactOut => {
                if let Token::Vault(vault) = view.token_out() {
                    let unit = view.token_out().unit()?;
                    if self.config.vault.reject_fractional_exact_out
                        && !VaultMath::is_whole(request.amount, vault.decimals)?
                    {
                        return Err(AmmError::VaultUnitMismatch {
                            amount: request.amount,
                            unit,
                        });
                    }
                }
                (view.get_amount_in(request.amount)?, request.amount)
            }
        };
        let price_impact = view.get_price_impact(amount_in, amount_out)?;

        // Post-trade reserves price any leftover conversion
        let (reserve_in, reserve_out) = view.get_liquidity();
        let reserve_in_after = reserve_in
            .checked_add(amount_in)
            .ok_or(AmmError::Overflow("evaluate"))?;
        let reserve_out_after = reserve_out - amount_out;

        let vault_in = match view.token_in() {
            Token::Vault(vault) => {
                let mut leg = VaultMath::plan_leg(vault, amount_in, LegDirection::Input)?;
                leg.check_selection(request.selected_items_in)?;
                // Excess vault tokens from rounding up go out against the paired side
                leg.leftover_converted =
                    self.convert_leftover(leg.leftover, reserve_in_after, reserve_out_after, view.get_fee())?;
                Some(leg)
            }
            Token::Fungible(_) => None,
        };

        let vault_out = match view.token_out() {
            Token::Vault(vault) => {
                let mut leg = VaultMath::plan_leg(vault, amount_out, LegDirection::Output)?;
                leg.check_selection(request.selected_items_out)?;
                leg.leftover_converted =
                    self.convert_leftover(leg.leftover, reserve_out_after, reserve_in_after, view.get_fee())?;
                Some(leg)
            }
            Token::Fungible(_) => None,
        };

        Ok(SwapRoute {
            path: vec![view.token_in().id(), view.token_out().id()],
            pools: vec![view.pool().address],
            trade_type: request.trade_type,
            amount_in,
            amount_out,
            price_impact,
            is_valid: true,
            invalid_reason: None,
            vault_in,
            vault_out,
        })
    }

    fn convert_leftover(
        &self,
        leftover: Option<U256>,
        reserve_vault: U256,
        reserve_paired: U256,
        fee: Fraction,
    ) -> Result<Option<U256>> {
        match (self.config.vault.leftover_policy, leftover) {
            (LeftoverPolicy::SwapToPaired, Some(amount)) => {
                VaultMath::convert_leftover(amount, reserve_vault, reserve_paired, fee)
            }
            _ => Ok(None),
        }
    }
}
