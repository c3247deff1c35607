//! Liquidity share accounting.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, Rounding, Shares};
use crate::error::{ExchangeError, Result};
use crate::math::{geometric_mean, mul_div, CheckedArithmetic};

/// Tolerance, in share units, between the two per-asset share
/// computations of a proportional deposit.  One unit is exactly the
/// floor-division rounding band.
const RATIO_TOLERANCE: u128 = 1;

/// Provider → shares mapping plus the outstanding total.
///
/// # Invariant
///
/// The sum of all positions equals [`total_shares`](Self::total_shares)
/// at all times: shares only enter circulation through
/// [`mint`](Self::mint) and leave through [`burn`](Self::burn), and both
/// update the position and the total together.  Positions that reach
/// zero are pruned.
///
/// # Share Math
///
/// - **First deposit** (total is zero): `shares = isqrt(amount_a *
///   amount_b)`, the geometric mean, so the initial share count is
///   independent of how asymmetric the deposited ratio is.
/// - **Subsequent deposits** must track the current reserve ratio: the
///   candidate share counts `total * amount_a / reserve_a` and `total *
///   amount_b / reserve_b` (both floored) may differ by at most one
///   share unit, and the smaller is minted.
/// - **Withdrawal** of `s` shares pays `reserve * s / total` of each
///   asset, floored; the residue stays in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiquidityAccounting {
    positions: BTreeMap<AccountId, Shares>,
    total_shares: Shares,
}

impl LiquidityAccounting {
    /// Creates an empty book with no outstanding shares.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the outstanding share total.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns `owner`'s position, zero if none exists.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Shares {
        self.positions.get(owner).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns the number of non-zero positions.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterates over all non-zero positions.
    pub fn positions(&self) -> impl Iterator<Item = (&AccountId, &Shares)> {
        self.positions.iter()
    }

    /// Computes the shares minted for a deposit of `(amount_a, amount_b)`
    /// against the given reserves.  Pure computation; call
    /// [`mint`](Self::mint) to record the result.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if either amount is zero, or
    ///   the deposit is too small to mint a single share.
    /// - [`ExchangeError::InsufficientLiquidity`] if shares are
    ///   outstanding but a reserve is zero (a drained pool cannot price
    ///   a proportional deposit).
    /// - [`ExchangeError::RatioMismatch`] if the deposit ratio diverges
    ///   from the reserve ratio beyond one share unit.
    pub fn shares_for_deposit(
        &self,
        reserve_a: Amount,
        reserve_b: Amount,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(ExchangeError::InvalidAmount(
                "both deposit amounts must be non-zero",
            ));
        }

        if self.total_shares.is_zero() {
            return Ok(geometric_mean(amount_a.get(), amount_b.get()));
        }

        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        let total = self.total_shares.get();
        let via_a = mul_div(total, amount_a.get(), reserve_a.get(), Rounding::Down)?;
        let via_b = mul_div(total, amount_b.get(), reserve_b.get(), Rounding::Down)?;

        if via_a.abs_diff(via_b) > RATIO_TOLERANCE {
            return Err(ExchangeError::RatioMismatch);
        }

        let minted = via_a.min(via_b);
        if minted == 0 {
            return Err(ExchangeError::InvalidAmount(
                "deposit too small to mint shares",
            ));
        }
        Ok(Shares::new(minted))
    }

    /// Computes the amounts paid out for burning `shares` against the
    /// given reserves.  Pure computation; call [`burn`](Self::burn) to
    /// record the result.
    ///
    /// Both payouts are floored; a dust-sized withdrawal may pay zero on
    /// one or both assets.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if `shares` is zero.
    /// - [`ExchangeError::InsufficientShares`] if `shares` exceeds the
    ///   outstanding total.
    pub fn amounts_for_withdrawal(
        &self,
        reserve_a: Amount,
        reserve_b: Amount,
        shares: Shares,
    ) -> Result<(Amount, Amount)> {
        if shares.is_zero() {
            return Err(ExchangeError::InvalidAmount(
                "withdrawal shares must be non-zero",
            ));
        }
        if shares > self.total_shares {
            return Err(ExchangeError::InsufficientShares);
        }

        let total = self.total_shares.get();
        let out_a = mul_div(reserve_a.get(), shares.get(), total, Rounding::Down)?;
        let out_b = mul_div(reserve_b.get(), shares.get(), total, Rounding::Down)?;
        Ok((Amount::new(out_a), Amount::new(out_b)))
    }

    /// Credits `shares` to `owner` and the outstanding total.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if either count would exceed
    /// `u128`; the book is unchanged on failure.
    pub(crate) fn mint(&mut self, owner: &AccountId, shares: Shares) -> Result<()> {
        let position = self.shares_of(owner).safe_add(&shares)?;
        let total = self.total_shares.safe_add(&shares)?;
        self.positions.insert(*owner, position);
        self.total_shares = total;
        Ok(())
    }

    /// Debits `shares` from `owner` and the outstanding total, pruning
    /// the position if it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InsufficientShares`] if `shares` exceeds
    /// `owner`'s position; the book is unchanged on failure.
    pub(crate) fn burn(&mut self, owner: &AccountId, shares: Shares) -> Result<()> {
        let position = self.shares_of(owner);
        let remaining = position
            .checked_sub(&shares)
            .ok_or(ExchangeError::InsufficientShares)?;
        // Position <= total by the share-sum invariant.
        let total = self.total_shares.safe_sub(&shares)?;
        if remaining.is_zero() {
            self.positions.remove(owner);
        } else {
            self.positions.insert(*owner, remaining);
        }
        self.total_shares = total;
        Ok(())
    }
}
