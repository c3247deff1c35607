//! Property-based tests using `proptest` for exchange invariant validation.
//!
//! Covers four properties:
//!
//! 1. **Invariant monotonicity** — the reserve product is non-decreasing
//!    over any sequence of swaps, and a failed swap changes nothing.
//! 2. **Liquidity conservation** — add then remove on an otherwise
//!    untouched pool returns the deposit within one unit per asset.
//! 3. **Share conservation** — the sum of all positions equals the
//!    outstanding total after every operation.
//! 4. **Swap reversibility** — a round trip A→B→A never returns more
//!    than the original input.

use proptest::prelude::*;

use crate::config::ExchangeConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetSide, FeeBps, Shares, SwapRequest};
use crate::error::ExchangeError;
use crate::exchange::PairExchange;
use crate::ledger::{AssetLedger, InMemoryLedger};
use crate::math::mul_wide;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset(byte: u8) -> AssetId {
    AssetId::from_bytes([byte; 32])
}

fn account(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn pool_account() -> AccountId {
    account(0xEE)
}

/// Funds `owner` with effectively unlimited balances of both assets and
/// approves the pool account for all of it.
fn fund(ledger: &mut InMemoryLedger, owner: &AccountId) {
    let plenty = Amount::new(u128::MAX / 4);
    for id in [asset(1), asset(2)] {
        let Ok(()) = ledger.mint(&id, owner, plenty) else {
            panic!("mint");
        };
        let Ok(()) = ledger.approve(&id, owner, &pool_account(), plenty) else {
            panic!("approve");
        };
    }
}

/// Exchange seeded with a symmetric first deposit of `reserve` per side.
fn funded_exchange(reserve: u128) -> (PairExchange, InMemoryLedger, AccountId) {
    let caller = account(10);
    let mut ledger = InMemoryLedger::new();
    fund(&mut ledger, &caller);

    let mut exchange = PairExchange::new(ExchangeConfig::new(pool_account(), FeeBps::STANDARD));
    let Ok(()) = exchange.initialize(asset(1), asset(2)) else {
        panic!("initialize");
    };
    let Ok(_) = exchange.add_liquidity(
        &mut ledger,
        &caller,
        Amount::new(reserve),
        Amount::new(reserve),
    ) else {
        panic!("seed deposit");
    };
    (exchange, ledger, caller)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Swap and deposit amounts in range [1, 100_000].
fn amount_strategy() -> impl Strategy<Value = u128> {
    1u128..=100_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Invariant monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reserve_product_never_decreases(
        reserve in reserve_strategy(),
        amounts in prop::collection::vec(amount_strategy(), 1..20),
    ) {
        let (mut exchange, mut ledger, caller) = funded_exchange(reserve);
        let (ra, rb) = exchange.reserves();
        let mut product = mul_wide(ra.get(), rb.get());

        for (i, amount) in amounts.iter().enumerate() {
            let side = if i % 2 == 0 { AssetSide::A } else { AssetSide::B };
            let Ok(request) = SwapRequest::new(Amount::new(*amount), side) else {
                panic!("amounts strategy is non-zero");
            };
            let before = exchange.reserves();
            match exchange.swap(&mut ledger, &caller, &request) {
                Ok(_) => {
                    let (a, b) = exchange.reserves();
                    let next = mul_wide(a.get(), b.get());
                    prop_assert!(next >= product, "product decreased: {next} < {product}");
                    product = next;
                }
                Err(_) => {
                    // A rejected swap must leave reserves untouched.
                    prop_assert_eq!(exchange.reserves(), before);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Property 2: Liquidity conservation
    // -----------------------------------------------------------------------

    #[test]
    fn add_then_remove_conserves_within_one_unit(
        reserve in reserve_strategy(),
        amount_a in amount_strategy(),
        skew in -1i64..=1i64,
    ) {
        let amount_b = amount_a.saturating_add_signed(i128::from(skew));
        prop_assume!(amount_b >= 1);

        let (mut exchange, mut ledger, _) = funded_exchange(reserve);
        let provider = account(20);
        fund(&mut ledger, &provider);

        // On a symmetric pool the per-side share counts are the raw
        // amounts, so a skew of one unit stays inside the ratio band.
        let Ok(minted) = exchange.add_liquidity(
            &mut ledger,
            &provider,
            Amount::new(amount_a),
            Amount::new(amount_b),
        ) else {
            panic!("deposit inside the ratio band");
        };
        let Ok((out_a, out_b)) = exchange.remove_liquidity(&mut ledger, &provider, minted) else {
            panic!("withdrawal of just-minted shares");
        };

        prop_assert!(out_a.get() <= amount_a);
        prop_assert!(out_b.get() <= amount_b);
        prop_assert!(amount_a - out_a.get() <= 1, "lost {} of asset A", amount_a - out_a.get());
        prop_assert!(amount_b - out_b.get() <= 1, "lost {} of asset B", amount_b - out_b.get());
    }

    // -----------------------------------------------------------------------
    // Property 3: Share conservation
    // -----------------------------------------------------------------------

    #[test]
    fn position_sum_equals_total_shares(
        reserve in reserve_strategy(),
        deposits in prop::collection::vec((0u8..3u8, amount_strategy()), 1..12),
    ) {
        let (mut exchange, mut ledger, seeder) = funded_exchange(reserve);
        let providers = [account(20), account(21), account(22)];
        for provider in &providers {
            fund(&mut ledger, provider);
        }

        for (who, amount) in deposits {
            let provider = providers[usize::from(who)];
            // Symmetric deposits keep the pool ratio at 1:1.
            match exchange.add_liquidity(
                &mut ledger,
                &provider,
                Amount::new(amount),
                Amount::new(amount),
            ) {
                Ok(_) => {}
                // A dust deposit can floor to zero shares once the share
                // supply is slightly coarser than the reserves.
                Err(ExchangeError::InvalidAmount(_)) => {}
                Err(err) => panic!("unexpected deposit failure: {err}"),
            }
            // Withdraw half of the position from time to time.
            let position = exchange.shares_of(&provider);
            if amount % 3 == 0 && position.get() >= 2 {
                let Ok(_) = exchange.remove_liquidity(
                    &mut ledger,
                    &provider,
                    Shares::new(position.get() / 2),
                ) else {
                    panic!("withdrawal within position");
                };
            }

            let mut sum = exchange.shares_of(&seeder).get();
            for provider in &providers {
                sum += exchange.shares_of(provider).get();
            }
            prop_assert_eq!(sum, exchange.total_shares().get());
        }
    }

    // -----------------------------------------------------------------------
    // Property 4: Swap reversibility
    // -----------------------------------------------------------------------

    #[test]
    fn round_trip_never_profits(
        reserve in reserve_strategy(),
        amount in amount_strategy(),
    ) {
        let (mut exchange, mut ledger, caller) = funded_exchange(reserve);

        let Ok(forward) = SwapRequest::new(Amount::new(amount), AssetSide::A) else {
            panic!("amount strategy is non-zero");
        };
        // Dust rejected outright on the forward leg is an acceptable outcome.
        if let Ok(out) = exchange.swap(&mut ledger, &caller, &forward) {
            let Ok(back) = SwapRequest::new(out.amount_out(), AssetSide::B) else {
                panic!("swap output is non-zero");
            };
            match exchange.swap(&mut ledger, &caller, &back) {
                Ok(returned) => prop_assert!(returned.amount_out().get() <= amount),
                // The reverse leg may round to nothing; a loss, not a profit.
                Err(_) => {}
            }
        }
    }
}
