//! 256-bit widening arithmetic.
//!
//! All products of two `u128` quantities are formed as [`U256`] values,
//! so no intermediate result can overflow; narrowing back to `u128`
//! happens once, at the end of each computation, and is checked.

use bnum::cast::As;
use bnum::types::U256;

use crate::domain::{Rounding, Shares};
use crate::error::{ExchangeError, Result};

/// Multiplies two `u128` values at 256-bit width.  Cannot overflow.
#[must_use]
pub fn mul_wide(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Computes `a * b / divisor` with the product held at 256-bit width.
///
/// # Errors
///
/// - [`ExchangeError::DivisionByZero`] if `divisor` is zero.
/// - [`ExchangeError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, divisor: u128, rounding: Rounding) -> Result<u128> {
    if divisor == 0 {
        return Err(ExchangeError::DivisionByZero);
    }
    let product = mul_wide(a, b);
    let divisor = U256::from(divisor);
    let quotient = product / divisor;
    let quotient = if rounding.is_up() && product % divisor != U256::ZERO {
        // Cannot overflow: a non-zero remainder means quotient < U256::MAX.
        quotient + U256::ONE
    } else {
        quotient
    };
    narrow(quotient)
}

/// Computes `isqrt(a * b)`, the geometric mean of two amounts, floored.
///
/// The root of a product of two `u128` values always fits in `u128`, so
/// this cannot fail.  Used for the first liquidity deposit's share count.
#[must_use]
pub fn geometric_mean(a: u128, b: u128) -> Shares {
    Shares::new(isqrt(mul_wide(a, b)))
}

/// Integer square root via Newton's method, floored.
fn isqrt(n: U256) -> u128 {
    if n == U256::ZERO {
        return 0;
    }
    let mut x = n;
    let mut y = (x + U256::ONE) / U256::from(2u32);
    while y < x {
        x = y;
        y = (x + n / x) / U256::from(2u32);
    }
    // x <= isqrt(U256::MAX) < 2^128.
    x.as_::<u128>()
}

/// Narrows a `U256` to `u128`, erroring if the value does not fit.
fn narrow(value: U256) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(ExchangeError::Overflow("quotient exceeds 128 bits"));
    }
    Ok(value.as_::<u128>())
}
