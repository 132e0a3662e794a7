//! Quote a WETH -> vault token swap against two pools and print the result
//!
//! Run with `RUST_LOG=amm=debug` to see candidate evaluation.

use amm::{format_percentage, math::fraction_to_percent, LiquidityMath, RouteFinder, RouteRequest, SlippageMath, YieldMath};
use anyhow::{Context, Result};
use config::EngineConfig;
use rust_decimal_macros::dec;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;
use types::precision::{format_units, parse_units};
use types::{
    ChainId, CollectionAddress, FungibleToken, Fraction, Pool, PoolAddress, Token, TokenAddress, TokenId, VaultToken,
};

fn token_id(n: u8) -> TokenId {
    let mut address = [0u8; 20];
    address[19] = n;
    TokenId::new(ChainId::new(1), TokenAddress::new(address))
}

fn pool(address: u8, weth: u64, items: u64, lp_fee_bps: u32) -> Result<Pool> {
    Ok(Pool {
        address: PoolAddress::new([address; 20]),
        token0: Token::Fungible(FungibleToken {
            id: token_id(1),
            symbol: "WETH".to_string(),
            decimals: 18,
            price_usd: Some(dec!(2000)),
        }),
        token1: Token::Vault(VaultToken {
            id: token_id(2),
            symbol: "PUNK".to_string(),
            decimals: 18,
            collection: CollectionAddress::new([0xc0; 20]),
            price_usd: Some(dec!(1000)),
        }),
        reserve0: parse_units(&weth.to_string(), 18)?,
        reserve1: parse_units(&items.to_string(), 18)?,
        total_supply: parse_units(&weth.to_string(), 18)?,
        lp_fee: Fraction::from_bps(lp_fee_bps),
        protocol_fee: None,
        royalty_fee: Some(Fraction::from_bps(20)),
        incentives: Vec::new(),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EngineConfig::default();
    let pools = vec![pool(0xa1, 50, 100, 30)?, pool(0xa2, 5, 10, 100)?];
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock before Unix epoch")?
        .as_secs();

    let finder = RouteFinder::new(&pools, &config);
    let request = RouteRequest::exact_in(token_id(1), token_id(2), parse_units("1.5", 18)?);
    let route = finder.find_best_route(&request);
    if let Some(reason) = &route.invalid_reason {
        anyhow::bail!("No executable route: {}", reason);
    }

    info!(
        pool = ?route.pools,
        amount_out = %format_units(route.amount_out, 18),
        price_impact = %format_percentage(fraction_to_percent(route.price_impact), 2),
        "Best route"
    );
    if let Some(leg) = &route.vault_out {
        info!(
            items = leg.item_count,
            leftover = %leg.leftover.map(|v| format_units(v, 18)).unwrap_or_default(),
            leftover_as_weth = %leg.leftover_converted.map(|v| format_units(v, 18)).unwrap_or_default(),
            "Vault leg"
        );
    }

    let bounds = SlippageMath::execution_bounds_with_config(&route, &config, None, now, None)?;
    info!(
        min_out = %format_units(bounds.amount_out_min, 18),
        deadline = bounds.deadline,
        "Execution bounds"
    );

    let burn = LiquidityMath::remove_liquidity(&pools[0], parse_units("1", 18)?)?;
    info!(
        weth = %format_units(burn.leg0.redeemable, 18),
        items = ?burn.leg1.item_count,
        residual_lp = %format_units(burn.leg1.residual_lp, 18),
        "Burning 1 LP"
    );

    let yields = YieldMath::pool_yield(&pools[0], dec!(350000), dec!(200000))?;
    info!(
        apr = %format_percentage(yields.apr, 2),
        apy = %format_percentage(yields.apy, 2),
        "Fee yield"
    );

    Ok(())
}
