//! Unified error types for the exchange library.
//!
//! All fallible operations across the crate return [`ExchangeError`] as
//! their error type, ensuring a consistent error handling experience for
//! consumers.  Every failure carries a specific variant — callers never
//! receive a generic error — so retries and user feedback can be precise.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ExchangeError>;

/// The unified error type for every fallible operation in the crate.
///
/// # Variant Groups
///
/// - **Lifecycle** — [`NotInitialized`](Self::NotInitialized),
///   [`AlreadyInitialized`](Self::AlreadyInitialized)
/// - **Validation** — [`InvalidAmount`](Self::InvalidAmount),
///   [`InvalidAsset`](Self::InvalidAsset), [`InvalidFee`](Self::InvalidFee)
/// - **Pool economics** — [`InsufficientLiquidity`](Self::InsufficientLiquidity),
///   [`ZeroOutput`](Self::ZeroOutput), [`RatioMismatch`](Self::RatioMismatch),
///   [`InsufficientShares`](Self::InsufficientShares)
/// - **Internal consistency** — [`WouldUnderflow`](Self::WouldUnderflow),
///   [`InvariantViolation`](Self::InvariantViolation),
///   [`Overflow`](Self::Overflow), [`DivisionByZero`](Self::DivisionByZero)
/// - **Ledger-surfaced** — [`InsufficientBalance`](Self::InsufficientBalance),
///   [`InsufficientAllowance`](Self::InsufficientAllowance)
///
/// `WouldUnderflow` and `InvariantViolation` signal a defect in the calling
/// code rather than a recoverable runtime condition: the mutation that would
/// have produced them is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// A state-changing operation was attempted before `initialize`.
    #[error("exchange is not initialized")]
    NotInitialized,

    /// `initialize` was called on an already-initialized exchange.
    #[error("exchange is already initialized")]
    AlreadyInitialized,

    /// An amount was zero (or otherwise degenerate) where a positive
    /// value is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// An asset identifier was rejected (e.g. a pair of identical assets).
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A fee rate outside the representable percentage range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A reserve required by the operation is zero, or the pool holds no
    /// liquidity at all.
    #[error("insufficient liquidity in the pool")]
    InsufficientLiquidity,

    /// The swap input was too small to produce any output after fee and
    /// rounding.
    #[error("swap output rounds to zero")]
    ZeroOutput,

    /// A liquidity deposit's ratio diverges from the current reserve ratio
    /// beyond the rounding tolerance.
    #[error("deposit ratio diverges from pool reserves")]
    RatioMismatch,

    /// A withdrawal requested more shares than the caller's position holds.
    #[error("insufficient shares for withdrawal")]
    InsufficientShares,

    /// A reserve or share subtraction would have gone negative.  Indicates
    /// an invariant break in the calling code, not a user error.
    #[error("reserve update would underflow: {0}")]
    WouldUnderflow(&'static str),

    /// A swap-driven reserve update would have decreased the reserve
    /// product.  Signals a pricing-engine defect; the update is not applied.
    #[error("reserve product invariant violated")]
    InvariantViolation,

    /// Checked arithmetic exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in pool math.
    #[error("division by zero")]
    DivisionByZero,

    /// The ledger reported a balance too small for the transfer.
    #[error("insufficient ledger balance")]
    InsufficientBalance,

    /// The ledger reported an allowance too small for the transfer.
    #[error("insufficient ledger allowance")]
    InsufficientAllowance,
}
