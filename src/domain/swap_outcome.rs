//! Outcome of a completed swap.

use core::fmt;

use super::Amount;
use crate::error::{ExchangeError, Result};

/// The settled result of one swap: amounts exchanged and the fee retained
/// by the pool.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in` — the fee is a strict fraction of the input.
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::{Amount, SwapOutcome};
///
/// let outcome = SwapOutcome::new(Amount::new(1_000), Amount::new(990), Amount::new(3));
/// assert!(outcome.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOutcome {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapOutcome {
    /// Creates a new `SwapOutcome` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAmount`] if `amount_in` or
    /// `amount_out` is zero, or if `fee >= amount_in`.
    pub const fn new(amount_in: Amount, amount_out: Amount, fee: Amount) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(ExchangeError::InvalidAmount("amount_out must be positive"));
        }
        if fee.get() >= amount_in.get() {
            return Err(ExchangeError::InvalidAmount(
                "fee must be less than amount_in",
            ));
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the amount the caller paid in.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the amount the caller received.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool, denominated in the input
    /// asset.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapOutcome(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}
