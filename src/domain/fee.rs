//! Swap fee expressed in basis points.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::{ExchangeError, Result};
use crate::math::mul_div;

/// Denominator for basis-point percentages (10 000 = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// The pool's swap fee as a fraction of the input amount, in basis points
/// (1 bp = 0.01%).
///
/// A `FeeBps` is always strictly below 100%: a full-input fee would make
/// every swap degenerate, so construction rejects values of 10 000 or
/// more.  The fee is deducted from the input amount *before* the pricing
/// curve is applied; the retained fee stays in the reserves, which is what
/// makes the reserve product grow over time.
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::FeeBps;
///
/// let fee = FeeBps::new(30).expect("0.30% is valid");
/// assert_eq!(fee.get(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeBps(u32);

impl FeeBps {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// The conventional 0.30% fee for volatile pairs (30 bp).
    pub const STANDARD: Self = Self(30);

    /// Creates a new `FeeBps`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidFee`] if `bps >= 10_000` (a fee of
    /// 100% or more).
    pub const fn new(bps: u32) -> Result<Self> {
        if bps >= BPS_DENOMINATOR {
            return Err(ExchangeError::InvalidFee(
                "fee must be below 10000 basis points",
            ));
        }
        Ok(Self(bps))
    }

    /// Returns the raw basis-point value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if no fee is charged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `10_000 - bps`, the input fraction that reaches the curve.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        BPS_DENOMINATOR - self.0
    }

    /// Computes `amount * bps / 10_000` with explicit rounding.
    ///
    /// The multiplication is performed at 256-bit width, so the only
    /// failure mode of the underlying division is unreachable here: the
    /// result is always at most `amount`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`mul_div`]; none occur for a valid fee.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        let raw = mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )?;
        Ok(Amount::new(raw))
    }
}

impl fmt::Display for FeeBps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
