//! End-to-end engine flow over a JSON pool snapshot
//!
//! Snapshot in, route out, then execution bounds, vault planning, liquidity
//! and yield figures, the way a UI layer would drive the engine.

use amm::{
    dec, format_percentage, AmmError, Decimal, LiquidityMath, PoolExt, RouteFinder, RouteRequest,
    SlippageMath, TradeType, YieldMath,
};
use config::{EngineConfig, LeftoverPolicy};
use types::precision::{format_units, parse_units};
use types::{Fraction, Pool, TokenId, UserPosition, U256};

const SNAPSHOT: &str = r#"[
  {
    "address": "0x00000000000000000000000000000000000000a1",
    "token0": {
      "kind": "fungible",
      "id": { "chain_id": 1, "address": "0x0000000000000000000000000000000000000001" },
      "symbol": "WETH",
      "decimals": 18,
      "price_usd": "2000"
    },
    "token1": {
      "kind": "vault",
      "id": { "chain_id": 1, "address": "0x0000000000000000000000000000000000000002" },
      "symbol": "PUNK",
      "decimals": 18,
      "collection": "0x00000000000000000000000000000000000000c0",
      "price_usd": "1000"
    },
    "reserve0": "50000000000000000000",
    "reserve1": "100000000000000000000",
    "total_supply": "70000000000000000000",
    "lp_fee": "0.003",
    "royalty_fee": "0.002",
    "incentives": [
      {
        "id": 7,
        "reward_token": {
          "kind": "fungible",
          "id": { "chain_id": 1, "address": "0x00000000000000000000000000000000000000ff" },
          "symbol": "RWD",
          "decimals": 18,
          "price_usd": "1"
        },
        "start_time": 1700000000,
        "end_time": 1700864000,
        "total_reward": "100000000000000000000000",
        "remaining_reward": "50000000000000000000000"
      }
    ]
  },
  {
    "address": "0x00000000000000000000000000000000000000a2",
    "token0": {
      "kind": "fungible",
      "id": { "chain_id": 1, "address": "0x0000000000000000000000000000000000000001" },
      "symbol": "WETH",
      "decimals": 18
    },
    "token1": {
      "kind": "vault",
      "id": { "chain_id": 1, "address": "0x0000000000000000000000000000000000000002" },
      "symbol": "PUNK",
      "decimals": 18,
      "collection": "0x00000000000000000000000000000000000000c0"
    },
    "reserve0": "5000000000000000000",
    "reserve1": "10000000000000000000",
    "total_supply": "7000000000000000000",
    "lp_fee": "0.01"
  }
]"#;

const NOW: u64 = 1_700_432_000;

fn snapshot() -> Vec<Pool> {
    serde_json::from_str(SNAPSHOT).expect("snapshot parses")
}

fn weth() -> TokenId {
    TokenId::parse(1, "0x0000000000000000000000000000000000000001").unwrap()
}

fn punk() -> TokenId {
    TokenId::parse(1, "0x0000000000000000000000000000000000000002").unwrap()
}

#[test]
fn test_snapshot_round_trips_through_serde() {
    let pools = snapshot();
    assert_eq!(pools.len(), 2);
    assert!(pools[0].token1.is_vault());
    assert_eq!(pools[0].swap_fee(), Fraction::from_bps(50));
    assert_eq!(pools[1].protocol_fee, None);

    let json = serde_json::to_string(&pools).unwrap();
    let back: Vec<Pool> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pools);
}

#[test]
fn test_buy_vault_items_exact_in() -> anyhow::Result<()> {
    let pools = snapshot();
    let config = EngineConfig::default();
    let finder = RouteFinder::new(&pools, &config);

    let amount = parse_units("1.5", 18)?;
    let route = finder.find_best_route(&RouteRequest::exact_in(weth(), punk(), amount));
    assert!(route.is_valid);
    // deeper pool wins
    assert_eq!(route.pools, vec![pools[0].address]);
    assert_eq!(route.trade_type, TradeType::ExactIn);

    // 1.5 WETH buys ~2.898 PUNK: two items plus convertible dust
    let leg = route.vault_out.clone().expect("vault output leg");
    assert_eq!(leg.item_count, 2);
    assert_eq!(leg.whole_amount, parse_units("2", 18)?);
    assert_eq!(leg.raw_amount, route.amount_out);
    assert!(leg.leftover.is_some());
    assert!(leg.leftover_converted.is_some());
    assert!(format_units(route.amount_out, 18).starts_with("2.89"));

    let bounds = SlippageMath::execution_bounds_with_config(&route, &config, None, NOW, None)?;
    assert_eq!(bounds.amount_in_max, amount);
    assert_eq!(bounds.amount_out_min, SlippageMath::amount_min(route.amount_out, Fraction::from_bps(50)));
    assert_eq!(bounds.deadline, NOW + 20 * 60);
    Ok(())
}

#[test]
fn test_buy_whole_items_exact_out() -> anyhow::Result<()> {
    let pools = snapshot();
    let config = EngineConfig::default();
    let finder = RouteFinder::new(&pools, &config);

    let two_items = parse_units("2", 18)?;
    let route = finder.find_best_route(&RouteRequest::exact_out(weth(), punk(), two_items).with_selected_items(None, Some(2)));
    assert!(route.is_valid);
    let leg = route.vault_out.clone().unwrap();
    assert_eq!(leg.item_count, 2);
    assert_eq!(leg.leftover, None);

    let bounds = SlippageMath::execution_bounds(&route, Fraction::from_bps(100), NOW, 5)?;
    assert_eq!(bounds.amount_out_min, two_items);
    assert!(bounds.amount_in_max > route.amount_in);
    assert_eq!(bounds.deadline, NOW + 300);

    // fractional items are rejected under the default policy
    let fractional = finder.find_best_route(&RouteRequest::exact_out(weth(), punk(), parse_units("2.5", 18)?));
    assert!(!fractional.is_valid);
    assert!(matches!(fractional.invalid_reason, Some(AmmError::VaultUnitMismatch { .. })));
    assert!(SlippageMath::execution_bounds(&fractional, Fraction::from_bps(100), NOW, 5).is_err());
    Ok(())
}

#[test]
fn test_sell_items_keep_leftover() -> anyhow::Result<()> {
    let pools = snapshot();
    let config = EngineConfig::from_toml_str(
        r#"
        [vault]
        leftover_policy = "keep"
        "#,
    )?;
    assert_eq!(config.vault.leftover_policy, LeftoverPolicy::Keep);
    let finder = RouteFinder::new(&pools, &config);

    let route = finder.find_best_route(&RouteRequest::exact_out(punk(), weth(), parse_units("1", 18)?));
    assert!(route.is_valid);
    let leg = route.vault_in.unwrap();
    // a little over 2 PUNK is needed, so 3 items go in and the rest is returned
    assert_eq!(leg.item_count, 3);
    assert!(leg.leftover.is_some());
    assert_eq!(leg.leftover_converted, None);
    Ok(())
}

#[test]
fn test_liquidity_round() -> anyhow::Result<()> {
    let pools = snapshot();
    let pool = &pools[0];

    let mint = LiquidityMath::add_liquidity_balanced(pool, weth(), parse_units("5", 18)?)?;
    assert_eq!(mint.amount1, parse_units("10", 18)?);
    assert_eq!(mint.lp_out, parse_units("7", 18)?);

    let burn = LiquidityMath::remove_liquidity(pool, parse_units("7", 18)?)?;
    assert_eq!(burn.leg0.redeemable, parse_units("5", 18)?);
    assert_eq!(burn.leg1.item_count, Some(10));
    assert_eq!(burn.leg1.residual, None);

    let uneven = LiquidityMath::remove_liquidity(pool, parse_units("1", 18)?)?;
    // 100 / 70 PUNK per LP leaves a sub-item residual
    assert_eq!(uneven.leg1.item_count, Some(1));
    assert!(uneven.leg1.residual.is_some());
    assert!(uneven.leg1.residual_lp > U256::zero());
    Ok(())
}

#[test]
fn test_position_and_yield_display() -> anyhow::Result<()> {
    let pools = snapshot();
    let pool = &pools[0];

    let mut position = UserPosition {
        pool: pool.address,
        lp_balance: parse_units("3", 18)?,
        lp_staked: parse_units("4", 18)?,
        ..Default::default()
    };
    position.subscribed_incentives.insert(pool.incentives[0].id);

    let value = LiquidityMath::value_position(pool, &position, NOW)?;
    assert_eq!(value.share_of_pool, Fraction::from_bps(1_000));
    // 5 WETH at $2000 + 10 PUNK at $1000
    assert_eq!(value.value_usd, Some(dec!(20000)));
    assert_eq!(value.active_incentives, vec![pool.incentives[0].id]);

    let fee_yield = YieldMath::pool_yield(pool, dec!(7000), dec!(10000))?;
    assert_eq!(fee_yield.apr, dec!(0.1095));
    assert_eq!(format_percentage(fee_yield.apr, 2), "0.11%");
    assert_eq!(format_percentage(Decimal::ZERO, 2), "0%");

    // 50_000 RWD over the remaining 5 days against $20k staked
    let reward_apr = YieldMath::incentive_apr(&pool.incentives[0], dec!(20000), NOW)?;
    assert_eq!(reward_apr, dec!(18250));

    let spot = pool.orient(weth())?.spot_price()?;
    assert_eq!(spot, dec!(2));
    Ok(())
}
