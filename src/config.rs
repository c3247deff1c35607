//! Exchange configuration.

use crate::domain::{AccountId, FeeBps};

/// Immutable parameters of a [`PairExchange`](crate::exchange::PairExchange).
///
/// The asset pair is *not* part of the configuration: it is bound later
/// via `initialize`, matching the deployment flow where the exchange
/// exists before its market is opened.
///
/// # Fields
///
/// - `pool_account` — the ledger account that custodies the reserves.
///   Deposits are pulled into it, payouts are paid from it, and callers
///   `approve` it as spender.
/// - `fee` — the swap fee, already validated by [`FeeBps::new`].
///
/// # Examples
///
/// ```
/// use xyk_exchange::config::ExchangeConfig;
/// use xyk_exchange::domain::{AccountId, FeeBps};
///
/// let config = ExchangeConfig::new(
///     AccountId::from_bytes([0xEE; 32]),
///     FeeBps::STANDARD,
/// );
/// assert_eq!(config.fee(), FeeBps::STANDARD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeConfig {
    pool_account: AccountId,
    fee: FeeBps,
}

impl ExchangeConfig {
    /// Creates a new configuration.
    ///
    /// `FeeBps` is validated at its own construction, so aggregation
    /// here is infallible.
    #[must_use]
    pub const fn new(pool_account: AccountId, fee: FeeBps) -> Self {
        Self { pool_account, fee }
    }

    /// Returns the reserve-custody account.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeBps {
        self.fee
    }
}
