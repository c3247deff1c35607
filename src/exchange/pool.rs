//! Pool reserves and the reserve-product invariant.

use crate::domain::{Amount, AssetId, AssetPair, AssetSide};
use crate::error::{ExchangeError, Result};
use crate::math::{mul_wide, CheckedArithmetic};

/// A signed adjustment to one reserve counter.
///
/// Liquidity deposits credit both sides; withdrawals debit both; a swap
/// credits the sold side and debits the bought side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveDelta {
    /// Increase the reserve by the given amount.
    Credit(Amount),
    /// Decrease the reserve by the given amount.
    Debit(Amount),
}

impl ReserveDelta {
    /// Applies this delta to a reserve value.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Overflow`] if a credit exceeds `u128`.
    /// - [`ExchangeError::WouldUnderflow`] if a debit goes below zero.
    fn apply_to(self, reserve: Amount) -> Result<Amount> {
        match self {
            Self::Credit(amount) => reserve.safe_add(&amount),
            Self::Debit(amount) => reserve
                .checked_sub(&amount)
                .ok_or(ExchangeError::WouldUnderflow("reserve debit")),
        }
    }
}

/// The pool: reserve counters for both assets plus the lifecycle state.
///
/// # State Machine
///
/// ```text
/// Uninitialized ──initialize──▶ Initialized(empty)
/// Initialized(empty) ──first deposit──▶ Initialized(funded)
/// Initialized(funded) ──add/remove/swap──▶ Initialized(funded|empty)
/// ```
///
/// There is no terminal state: a drained pool keeps its asset pair and
/// can be refunded.  Every mutation other than `initialize` on an
/// uninitialized pool fails with
/// [`ExchangeError::NotInitialized`].
///
/// # Invariant
///
/// After every swap-driven mutation, `reserve_a' * reserve_b' >=
/// reserve_a * reserve_b` (products compared at 256-bit width).  A
/// violation means the pricing engine produced a bad quote; the mutation
/// is rejected with [`ExchangeError::InvariantViolation`] and no state
/// changes.  Liquidity deposits and withdrawals move the product by
/// design and are exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pool {
    assets: Option<AssetPair>,
    reserve_a: Amount,
    reserve_b: Amount,
}

impl Pool {
    /// Creates an uninitialized pool with zero reserves.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            assets: None,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
        }
    }

    /// Binds the pool to its asset pair.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::AlreadyInitialized`] on a second call.
    /// - [`ExchangeError::InvalidAsset`] if the two identifiers are equal.
    pub fn initialize(&mut self, asset_a: AssetId, asset_b: AssetId) -> Result<()> {
        if self.assets.is_some() {
            return Err(ExchangeError::AlreadyInitialized);
        }
        self.assets = Some(AssetPair::new(asset_a, asset_b)?);
        Ok(())
    }

    /// Returns `true` once `initialize` has succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.assets.is_some()
    }

    /// Returns the bound asset pair.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::NotInitialized`] before `initialize`.
    pub fn assets(&self) -> Result<&AssetPair> {
        self.assets.as_ref().ok_or(ExchangeError::NotInitialized)
    }

    /// Returns both reserves as `(reserve_a, reserve_b)`.
    ///
    /// A pure read: `(0, 0)` before initialization or when drained.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Returns the reserve on the given side.
    #[must_use]
    pub const fn reserve(&self, side: AssetSide) -> Amount {
        match side {
            AssetSide::A => self.reserve_a,
            AssetSide::B => self.reserve_b,
        }
    }

    /// Returns `true` if both reserves are non-zero.
    #[must_use]
    pub const fn is_funded(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }

    /// Adjusts both reserves as one atomic unit.
    ///
    /// Both new values are computed before either is assigned, so a
    /// failure leaves the pool untouched.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::WouldUnderflow`] if a debit would go negative.
    /// - [`ExchangeError::Overflow`] if a credit exceeds `u128`.
    pub(crate) fn apply_delta(
        &mut self,
        delta_a: ReserveDelta,
        delta_b: ReserveDelta,
    ) -> Result<()> {
        let next_a = delta_a.apply_to(self.reserve_a)?;
        let next_b = delta_b.apply_to(self.reserve_b)?;
        self.reserve_a = next_a;
        self.reserve_b = next_b;
        Ok(())
    }

    /// Applies a swap's reserve movement and asserts the product
    /// invariant, as one atomic unit.
    ///
    /// The sold side is credited `amount_in` (fee included — it stays in
    /// the reserves), the bought side debited `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::WouldUnderflow`] / [`ExchangeError::Overflow`]
    ///   from the reserve arithmetic.
    /// - [`ExchangeError::InvariantViolation`] if the new reserve product
    ///   would fall below the old one.  Unreachable through
    ///   [`SwapEngine`](super::SwapEngine) quotes; it guards against
    ///   pricing bugs.
    pub(crate) fn commit_swap(
        &mut self,
        side_in: AssetSide,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<()> {
        let product_before = mul_wide(self.reserve_a.get(), self.reserve_b.get());

        let (delta_a, delta_b) = match side_in {
            AssetSide::A => (ReserveDelta::Credit(amount_in), ReserveDelta::Debit(amount_out)),
            AssetSide::B => (ReserveDelta::Debit(amount_out), ReserveDelta::Credit(amount_in)),
        };

        let mut next = *self;
        next.apply_delta(delta_a, delta_b)?;

        let product_after = mul_wide(next.reserve_a.get(), next.reserve_b.get());
        if product_after < product_before {
            return Err(ExchangeError::InvariantViolation);
        }

        *self = next;
        Ok(())
    }
}
