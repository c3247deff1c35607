//! Swap operation descriptor.

use core::fmt;

use super::{Amount, AssetSide};
use crate::error::{ExchangeError, Result};

/// Describes one swap: how much of which side the caller is selling.
///
/// A `SwapRequest` is transient — it exists only for the duration of one
/// `swap` call and is never persisted.
///
/// # Invariants
///
/// `amount_in` is always non-zero; construction rejects zero with
/// [`ExchangeError::InvalidAmount`].
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::{Amount, AssetSide, SwapRequest};
///
/// let request = SwapRequest::new(Amount::new(1_000), AssetSide::A);
/// assert!(request.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    amount_in: Amount,
    side_in: AssetSide,
}

impl SwapRequest {
    /// Creates a new `SwapRequest`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAmount`] if `amount_in` is zero.
    pub const fn new(amount_in: Amount, side_in: AssetSide) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount("swap input must be non-zero"));
        }
        Ok(Self { amount_in, side_in })
    }

    /// Returns the amount being sold.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the side being sold.
    #[must_use]
    pub const fn side_in(&self) -> AssetSide {
        self.side_in
    }

    /// Returns the side being bought.
    #[must_use]
    pub const fn side_out(&self) -> AssetSide {
        self.side_in.opposite()
    }
}

impl fmt::Display for SwapRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Swap({} of {})", self.amount_in, self.side_in)
    }
}
