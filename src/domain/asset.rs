//! Asset identifiers, the A/B side selector, and the pool's asset pair.

use core::fmt;

use crate::error::{ExchangeError, Result};

/// A chain-agnostic identifier for one fungible asset.
///
/// Wraps a fixed-size `[u8; 32]` byte array.  All 32-byte sequences are
/// valid identifiers, so construction is infallible.
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::AssetId;
///
/// let asset = AssetId::from_bytes([1u8; 32]);
/// assert_eq!(asset.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

/// Selects one side of the pool: asset A or asset B.
///
/// Swap requests name the side being sold; the pool derives the bought
/// side via [`opposite`](Self::opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSide {
    /// The pool's first asset.
    A,
    /// The pool's second asset.
    B,
}

impl AssetSide {
    /// Returns the other side of the pool.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for AssetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The two distinct assets a pool trades between.
///
/// Unlike an order-book venue, the pair is *positional*: asset A is
/// whatever `initialize` received first, and every reserve counter, side
/// selector, and quote refers to that ordering.  The only structural
/// requirement is that the two identifiers differ.
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::{AssetId, AssetPair, AssetSide};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// let pair = AssetPair::new(a, b).expect("distinct assets");
/// assert_eq!(pair.asset(AssetSide::A), a);
/// assert_eq!(pair.asset(AssetSide::B), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a new `AssetPair` in the given A/B order.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAsset`] if both identifiers are
    /// equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self> {
        if asset_a == asset_b {
            return Err(ExchangeError::InvalidAsset(
                "pool requires two distinct assets",
            ));
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the identifier of asset A.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the identifier of asset B.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns the identifier on the given side.
    #[must_use]
    pub const fn asset(&self, side: AssetSide) -> AssetId {
        match side {
            AssetSide::A => self.asset_a,
            AssetSide::B => self.asset_b,
        }
    }

    /// Returns the side of `asset` in this pair, if it is a member.
    #[must_use]
    pub fn side_of(&self, asset: &AssetId) -> Option<AssetSide> {
        if *asset == self.asset_a {
            Some(AssetSide::A)
        } else if *asset == self.asset_b {
            Some(AssetSide::B)
        } else {
            None
        }
    }

    /// Returns `true` if `asset` is one of the pair's members.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.side_of(asset).is_some()
    }
}
