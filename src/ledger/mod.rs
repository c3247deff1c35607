//! The external asset ledger interface.
//!
//! The exchange never holds asset balances itself: reserves are custodied
//! on an external ledger under the pool's own [`AccountId`], and every
//! deposit, withdrawal, and swap settles through ledger transfers.  This
//! module defines that collaborator as a trait, [`AssetLedger`], plus an
//! in-memory implementation ([`InMemoryLedger`]) used by the integration
//! tests and as a reference for adapter authors.
//!
//! # Transfer Authority
//!
//! The ledger models the usual owner/spender split: `transfer` moves an
//! owner's funds directly, while `transfer_from` lets a previously
//! [`approve`](AssetLedger::approve)d spender move them on the owner's
//! behalf, consuming allowance.  The exchange pulls deposits with
//! `transfer_from` (the pool account acting as spender) and pays out with
//! `transfer` from the pool account.

mod memory;

pub use memory::InMemoryLedger;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::Result;

/// External ledger holding per-owner balances of each asset.
///
/// Every method that moves funds fails loudly — a transfer exceeding the
/// balance or allowance returns an error, never a silent no-op.
///
/// # Errors
///
/// Implementations must use the crate's error taxonomy:
///
/// - [`ExchangeError::InsufficientBalance`](crate::error::ExchangeError::InsufficientBalance)
///   when the owner's balance cannot cover a transfer.
/// - [`ExchangeError::InsufficientAllowance`](crate::error::ExchangeError::InsufficientAllowance)
///   when the spender's allowance cannot cover a `transfer_from`.
pub trait AssetLedger {
    /// Returns `owner`'s balance of `asset`.
    fn balance_of(&self, asset: &AssetId, owner: &AccountId) -> Amount;

    /// Returns how much of `owner`'s `asset` the `spender` may move via
    /// [`transfer_from`](Self::transfer_from).
    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Sets `spender`'s allowance over `owner`'s `asset` to `amount`,
    /// replacing any previous allowance.
    ///
    /// # Errors
    ///
    /// Implementation-specific; the in-memory ledger never fails here.
    fn approve(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<()>;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` if `from`'s balance is below
    /// `amount`.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()>;

    /// Moves `amount` of `asset` from `owner` to `to` on the authority of
    /// `spender`, consuming that much of the spender's allowance.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientAllowance` if the allowance is below `amount`,
    /// or `InsufficientBalance` if the owner's balance is.
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()>;
}
