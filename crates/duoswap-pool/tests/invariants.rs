//! Randomized accounting invariants, seeded for repeatable runs

use duoswap_core::{Address, BPS_DENOM, TREASURY_FEE_BPS};
use duoswap_ledger::{AssetLedger, MemoryLedger};
use duoswap_pool::{Exchange, PoolRegistry, RegistryConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Env {
    exchange: Exchange<MemoryLedger>,
    pool: Address,
    asset_a: Address,
    asset_b: Address,
    treasury: Address,
}

fn setup(holders: &[Address], funding: u64) -> Env {
    let treasury = Address::from_label("treasury");
    let registry = PoolRegistry::new(RegistryConfig::new(treasury)).unwrap();
    let mut exchange = Exchange::new(MemoryLedger::new(), registry);
    let pool = exchange
        .create_pool(Address::from_label("x"), Address::from_label("y"))
        .unwrap();
    let (asset_a, asset_b) = {
        let p = exchange.pool(&pool).unwrap();
        (p.asset_a(), p.asset_b())
    };
    for holder in holders {
        exchange.mint_asset(&asset_a, holder, funding).unwrap();
        exchange.mint_asset(&asset_b, holder, funding).unwrap();
    }
    Env {
        exchange,
        pool,
        asset_a,
        asset_b,
        treasury,
    }
}

fn assert_custody_matches(env: &Env) {
    let pool = env.exchange.pool(&env.pool).unwrap();
    let ledger = env.exchange.ledger();
    assert_eq!(
        (
            ledger.balance_of(&env.asset_a, &env.pool),
            ledger.balance_of(&env.asset_b, &env.pool)
        ),
        pool.reserves()
    );
    let sum: u64 = pool.shares().holders().map(|(_, amount)| *amount).sum();
    assert_eq!(sum, pool.total_shares());
}

#[test]
fn test_deposit_then_withdraw_never_gains() {
    let mut rng = StdRng::seed_from_u64(7);
    let seeder = Address::from_label("seeder");
    let depositor = Address::from_label("depositor");

    for _ in 0..200 {
        let mut env = setup(&[seeder, depositor], 1_000_000_000_000);
        let seed_a: u64 = rng.gen_range(1_000..1_000_000);
        let seed_b: u64 = rng.gen_range(1_000..1_000_000);
        let seed_shares = env
            .exchange
            .add_liquidity(&seeder, &env.pool, seed_a, seed_b)
            .unwrap();

        // Deposit at (just above) the pool ratio
        let amount_a: u64 = rng.gen_range(1..1_000_000);
        let amount_b = ((amount_a as u128) * (seed_b as u128) / (seed_a as u128)) as u64 + 1;
        let shares = match env.exchange.add_liquidity(&depositor, &env.pool, amount_a, amount_b) {
            Ok(shares) => shares,
            // Too small to mint a single share
            Err(_) => continue,
        };

        let (out_a, out_b) = env
            .exchange
            .remove_liquidity(&depositor, &env.pool, shares)
            .unwrap();

        assert!(out_a <= amount_a && out_b <= amount_b);
        // Loss is bounded by the value of one share plus floor rounding
        let s = seed_shares as u128;
        assert!(((amount_a - out_a) as u128) * s <= seed_a as u128 + s);
        assert!(((amount_b - out_b) as u128) * s <= seed_b as u128 + 2 * s);
        assert_eq!(
            env.exchange.pool(&env.pool).unwrap().share_balance(&depositor),
            0
        );
        assert_custody_matches(&env);
    }
}

#[test]
fn test_sole_provider_round_trip_is_exact_within_one_unit() {
    let mut rng = StdRng::seed_from_u64(11);
    let provider = Address::from_label("provider");

    for _ in 0..200 {
        let mut env = setup(&[provider], u64::MAX / 4);
        let amount_a = rng.gen_range(1..u32::MAX as u64);
        let amount_b = rng.gen_range(1..u32::MAX as u64);

        let shares = env
            .exchange
            .add_liquidity(&provider, &env.pool, amount_a, amount_b)
            .unwrap();
        let (out_a, out_b) = env
            .exchange
            .remove_liquidity(&provider, &env.pool, shares)
            .unwrap();

        assert!(amount_a - out_a <= 1);
        assert!(amount_b - out_b <= 1);
        assert_eq!(env.exchange.pool(&env.pool).unwrap().total_shares(), 0);
    }
}

#[test]
fn test_swaps_never_decrease_product_and_pay_exact_treasury_fee() {
    let mut rng = StdRng::seed_from_u64(42);
    let trader = Address::from_label("trader");
    let mut env = setup(&[trader], 1_000_000_000_000);

    env.exchange
        .add_liquidity(&trader, &env.pool, 50_000_000, 80_000_000)
        .unwrap();

    for _ in 0..500 {
        let (reserve_a, reserve_b) = env.exchange.pool(&env.pool).unwrap().reserves();
        let k_before = (reserve_a as u128) * (reserve_b as u128);

        let a_in = rng.gen_bool(0.5);
        let (asset_in, reserve_in) = if a_in {
            (env.asset_a, reserve_a)
        } else {
            (env.asset_b, reserve_b)
        };
        let amount_in = rng.gen_range(1_000..=reserve_in / 4 + 1_000);
        let treasury_before = env.exchange.balance_of(&asset_in, &env.treasury);

        env.exchange
            .transfer(&trader, &asset_in, &env.pool, amount_in)
            .unwrap();
        let (min_out_a, min_out_b) = if a_in { (0, 1) } else { (1, 0) };
        let outcome = env
            .exchange
            .swap(&trader, &env.pool, min_out_a, min_out_b)
            .unwrap();

        let (after_a, after_b) = env.exchange.pool(&env.pool).unwrap().reserves();
        assert!((after_a as u128) * (after_b as u128) >= k_before);

        let expected_fee =
            ((outcome.amount_in as u128) * (TREASURY_FEE_BPS as u128) / (BPS_DENOM as u128)) as u64;
        assert_eq!(outcome.treasury_fee, expected_fee);
        assert_eq!(
            env.exchange.balance_of(&asset_in, &env.treasury) - treasury_before,
            expected_fee
        );
        assert_custody_matches(&env);
    }
}

#[test]
fn test_mixed_operations_keep_custody_in_sync() {
    let mut rng = StdRng::seed_from_u64(2024);
    let actors: Vec<Address> = (0..4)
        .map(|i| Address::from_label(&format!("actor{}", i)))
        .collect();
    let mut env = setup(&actors, 10_000_000_000);

    for _ in 0..1000 {
        let actor = actors[rng.gen_range(0..actors.len())];
        match rng.gen_range(0..4) {
            0 => {
                let _ = env.exchange.add_liquidity(
                    &actor,
                    &env.pool,
                    rng.gen_range(0..1_000_000),
                    rng.gen_range(0..1_000_000),
                );
            }
            1 => {
                let held = env.exchange.pool(&env.pool).unwrap().share_balance(&actor);
                let _ = env
                    .exchange
                    .remove_liquidity(&actor, &env.pool, rng.gen_range(0..=held));
            }
            2 => {
                let asset = if rng.gen_bool(0.5) { env.asset_a } else { env.asset_b };
                let _ = env.exchange.swap_exact_input(
                    &actor,
                    &env.pool,
                    &asset,
                    rng.gen_range(0..500_000),
                    rng.gen_range(0..1_000),
                );
            }
            _ => {
                let to = actors[rng.gen_range(0..actors.len())];
                let held = env.exchange.pool(&env.pool).unwrap().share_balance(&actor);
                let _ = env
                    .exchange
                    .transfer_shares(&actor, &env.pool, &to, rng.gen_range(0..=held));
            }
        }
        assert_custody_matches(&env);
    }
}
