//! The constant-product exchange core.
//!
//! Three collaborators, composed by the [`PairExchange`] facade:
//!
//! | Component | Owns | Responsibility |
//! |-----------|------|----------------|
//! | [`Pool`] | reserve counters, lifecycle state | reserve mutation, product invariant |
//! | [`LiquidityAccounting`] | provider → shares map, total shares | share minting/burning math |
//! | [`SwapEngine`] | the fee rate | fee-adjusted constant-product pricing |
//!
//! [`PairExchange`] drives all three against an external
//! [`AssetLedger`](crate::ledger::AssetLedger) with
//! checks-effects-interactions ordering, so every public operation is
//! all-or-nothing.

mod liquidity;
mod pair_exchange;
mod pool;
#[cfg(test)]
mod proptest_properties;
mod swap;

pub use liquidity::LiquidityAccounting;
pub use pair_exchange::PairExchange;
pub use pool::{Pool, ReserveDelta};
pub use swap::SwapEngine;
