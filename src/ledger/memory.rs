//! Map-backed asset ledger.

use std::collections::BTreeMap;

use super::AssetLedger;
use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{ExchangeError, Result};
use crate::math::CheckedArithmetic;

/// An in-memory [`AssetLedger`] backed by balance and allowance maps.
///
/// Used by the integration tests, and as a reference implementation for
/// adapters binding the exchange to a real ledger.  Balances are created
/// by [`mint`](Self::mint); there is no supply cap beyond `u128`.
///
/// # Examples
///
/// ```
/// use xyk_exchange::domain::{AccountId, Amount, AssetId};
/// use xyk_exchange::ledger::{AssetLedger, InMemoryLedger};
///
/// let asset = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
/// let bob = AccountId::from_bytes([11u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&asset, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&asset, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&asset, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    allowances: BTreeMap<(AssetId, AccountId, AccountId), Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `owner` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the balance would exceed
    /// `u128`.
    pub fn mint(&mut self, asset: &AssetId, owner: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balances.entry((*asset, *owner)).or_default();
        *balance = balance.safe_add(&amount)?;
        Ok(())
    }

    fn debit(&mut self, asset: &AssetId, owner: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balances.entry((*asset, *owner)).or_default();
        *balance = balance
            .checked_sub(&amount)
            .ok_or(ExchangeError::InsufficientBalance)?;
        Ok(())
    }

    fn credit(&mut self, asset: &AssetId, owner: &AccountId, amount: Amount) -> Result<()> {
        let balance = self.balances.entry((*asset, *owner)).or_default();
        *balance = balance.safe_add(&amount)?;
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: &AssetId, owner: &AccountId) -> Amount {
        self.balances
            .get(&(*asset, *owner))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.allowances.insert((*asset, *owner, *spender), amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(asset, owner, spender);
        if allowed < amount {
            return Err(ExchangeError::InsufficientAllowance);
        }
        if self.balance_of(asset, owner) < amount {
            return Err(ExchangeError::InsufficientBalance);
        }
        let remaining = allowed
            .checked_sub(&amount)
            .ok_or(ExchangeError::InsufficientAllowance)?;
        self.allowances.insert((*asset, *owner, *spender), remaining);
        self.debit(asset, owner, amount)?;
        self.credit(asset, to, amount)
    }
}
