//! Exact integer arithmetic for pool math.
//!
//! Reserve products and swap numerators exceed 128 bits at realistic
//! token scales, so every multiply-then-divide in the exchange runs at
//! 256-bit width ([`wide`]) and narrows back to `u128` only at the end.
//! [`checked`] lifts the domain types' `Option` arithmetic into `Result`
//! with specific error variants.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{geometric_mean, mul_div, mul_wide};
