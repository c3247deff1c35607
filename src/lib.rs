//! # XYK Exchange
//!
//! A constant-product (`x · y = k`) exchange engine: a pool holding
//! reserves of two fungible assets, liquidity-share accounting, and a
//! swap-pricing engine that keeps the reserve product non-decreasing.
//! Asset custody lives on an external ledger, abstracted behind the
//! [`AssetLedger`](ledger::AssetLedger) trait; the engine mirrors it with
//! exact integer arithmetic — 256-bit products, explicit rounding, no
//! silent overflow.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xyk-exchange = "0.1"
//! ```
//!
//! ## Open a market, provide liquidity, swap
//!
//! ```rust
//! use xyk_exchange::config::ExchangeConfig;
//! use xyk_exchange::domain::{AccountId, Amount, AssetId, AssetSide, FeeBps, SwapRequest};
//! use xyk_exchange::exchange::PairExchange;
//! use xyk_exchange::ledger::{AssetLedger, InMemoryLedger};
//!
//! // 1. Two assets and two ledger accounts.
//! let asset_a = AssetId::from_bytes([1u8; 32]);
//! let asset_b = AssetId::from_bytes([2u8; 32]);
//! let pool = AccountId::from_bytes([0xEE; 32]);
//! let alice = AccountId::from_bytes([10u8; 32]);
//!
//! // 2. Fund the caller and approve the pool account as spender.
//! let mut ledger = InMemoryLedger::new();
//! ledger.mint(&asset_a, &alice, Amount::new(1_000)).expect("mint");
//! ledger.mint(&asset_b, &alice, Amount::new(2_000)).expect("mint");
//! ledger.approve(&asset_a, &alice, &pool, Amount::new(1_000)).expect("approve");
//! ledger.approve(&asset_b, &alice, &pool, Amount::new(2_000)).expect("approve");
//!
//! // 3. Create and initialize the exchange (0.30% fee).
//! let mut exchange = PairExchange::new(ExchangeConfig::new(pool, FeeBps::STANDARD));
//! exchange.initialize(asset_a, asset_b).expect("initialize");
//!
//! // 4. First deposit mints sqrt(100 * 200) shares.
//! let minted = exchange
//!     .add_liquidity(&mut ledger, &alice, Amount::new(100), Amount::new(200))
//!     .expect("deposit");
//! assert_eq!(minted.get(), 141);
//!
//! // 5. Sell 10 A for B at the fee-adjusted constant-product price.
//! let request = SwapRequest::new(Amount::new(10), AssetSide::A).expect("request");
//! let outcome = exchange.swap(&mut ledger, &alice, &request).expect("swap");
//! assert!(outcome.amount_out().get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  builds ExchangeConfig, calls PairExchange
//! └──────┬───────┘
//!        │ add_liquidity / remove_liquidity / swap
//!        ▼
//! ┌──────────────┐      checks-effects-interactions
//! │ PairExchange  │──────────────────────────────┐
//! └──────┬───────┘                              ▼
//!        │                               ┌──────────────┐
//!        │ reserves, shares, quotes      │  AssetLedger  │  external custody
//!        ▼                               └──────────────┘
//! ┌──────────────────────────────────────┐
//! │ Pool · LiquidityAccounting · SwapEngine │
//! └──────┬───────────────────────────────┘
//!        │ 256-bit products, explicit rounding
//!        ▼
//! ┌──────────────┐
//! │    Domain     │  Amount, Shares, AssetPair, FeeBps, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), etc. |
//! | [`exchange`] | [`PairExchange`](exchange::PairExchange) facade plus [`Pool`](exchange::Pool), [`LiquidityAccounting`](exchange::LiquidityAccounting), [`SwapEngine`](exchange::SwapEngine) |
//! | [`ledger`] | The [`AssetLedger`](ledger::AssetLedger) collaborator trait and [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig): pool account and fee |
//! | [`math`]   | 256-bit widening arithmetic and the [`CheckedArithmetic`](math::CheckedArithmetic) trait |
//! | [`error`]  | [`ExchangeError`](error::ExchangeError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `tracing` | no | Emit `tracing` debug events on successful state transitions |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod math;
pub mod prelude;
