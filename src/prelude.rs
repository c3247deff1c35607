//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use xyk_exchange::prelude::*;
//! ```

// Domain types
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, AssetSide, FeeBps, Rounding, Shares, SwapOutcome,
    SwapRequest,
};

// Core components
pub use crate::exchange::{LiquidityAccounting, PairExchange, Pool, SwapEngine};

// Ledger seam
pub use crate::ledger::{AssetLedger, InMemoryLedger};

// Configuration
pub use crate::config::ExchangeConfig;

// Math utilities
pub use crate::math::CheckedArithmetic;

// Error types
pub use crate::error::{ExchangeError, Result};
