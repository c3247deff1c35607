//! Constant-product swap pricing.
//!
//! The pricing rule holds the reserve product non-decreasing.  With
//! `(reserve_in, reserve_out)` the reserves of the sold and bought
//! assets:
//!
//! 1. `fee = amount_in × fee_bps / 10 000` (rounded up)
//! 2. `effective_in = amount_in − fee`
//! 3. `amount_out = reserve_out × effective_in / (reserve_in + effective_in)` (floored)
//! 4. The sold reserve grows by the full `amount_in` — the fee stays in
//!    the pool — and the bought reserve shrinks by `amount_out`.
//!
//! Step 3 is the integer rearrangement of solving `x · y = k` for the
//! new output reserve; with the quotient floored, rounding never favors
//! the caller and `k` cannot decrease.

use super::pool::Pool;
use crate::domain::{Amount, FeeBps, Rounding, SwapOutcome, SwapRequest};
use crate::error::{ExchangeError, Result};
use crate::math::{mul_div, CheckedArithmetic};

/// Prices swaps against pool reserves and drives the reserve update.
///
/// The engine is stateless apart from its fee rate; every quote is a
/// pure function of the reserves passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEngine {
    fee: FeeBps,
}

impl SwapEngine {
    /// Creates an engine charging the given fee on every swap input.
    #[must_use]
    pub const fn new(fee: FeeBps) -> Self {
        Self { fee }
    }

    /// Returns the fee rate.
    #[must_use]
    pub const fn fee(&self) -> FeeBps {
        self.fee
    }

    /// Quotes a swap of `amount_in` against `(reserve_in, reserve_out)`
    /// without touching any state.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if `amount_in` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if either reserve is
    ///   zero.
    /// - [`ExchangeError::ZeroOutput`] if the input is too small to
    ///   produce any output after fee and rounding.
    pub fn quote(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
    ) -> Result<SwapOutcome> {
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount("swap input must be non-zero"));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        // Fee rounds up; the output floors.  Both round against the caller.
        let fee = self.fee.apply(amount_in, Rounding::Up)?;
        let effective_in = amount_in.safe_sub(&fee)?;
        if effective_in.is_zero() {
            return Err(ExchangeError::ZeroOutput);
        }

        let denominator = reserve_in.safe_add(&effective_in)?;
        let amount_out = Amount::new(mul_div(
            reserve_out.get(),
            effective_in.get(),
            denominator.get(),
            Rounding::Down,
        )?);

        if amount_out.is_zero() {
            return Err(ExchangeError::ZeroOutput);
        }
        if amount_out >= reserve_out {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        SwapOutcome::new(amount_in, amount_out, fee)
    }

    /// Prices `request` against the pool and commits the reserve
    /// movement, including the product-invariant check.
    ///
    /// The ledger settlement is the caller's responsibility; this method
    /// only moves the reserve counters.
    ///
    /// # Errors
    ///
    /// Everything [`quote`](Self::quote) returns, plus the errors of
    /// [`Pool::commit_swap`] — all leaving the pool unchanged.
    pub(crate) fn execute(&self, pool: &mut Pool, request: &SwapRequest) -> Result<SwapOutcome> {
        let side_in = request.side_in();
        let reserve_in = pool.reserve(side_in);
        let reserve_out = pool.reserve(side_in.opposite());

        let outcome = self.quote(reserve_in, reserve_out, request.amount_in())?;
        pool.commit_swap(side_in, outcome.amount_in(), outcome.amount_out())?;
        Ok(outcome)
    }
}
