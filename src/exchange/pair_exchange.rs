//! The public exchange facade.

use super::liquidity::LiquidityAccounting;
use super::pool::{Pool, ReserveDelta};
use super::swap::SwapEngine;
use crate::config::ExchangeConfig;
use crate::domain::{
    AccountId, Amount, AssetId, FeeBps, Shares, SwapOutcome, SwapRequest,
};
use crate::error::{ExchangeError, Result};
use crate::ledger::AssetLedger;

/// Pre-effect state image used to unwind a failed operation.
struct Snapshot {
    pool: Pool,
    liquidity: LiquidityAccounting,
}

/// A two-asset constant-product exchange.
///
/// `PairExchange` owns the [`Pool`] and the [`LiquidityAccounting`] book
/// and drives them together with an external
/// [`AssetLedger`](crate::ledger::AssetLedger).  The exchange holds no
/// asset balances itself: reserves live on the ledger under the
/// configured pool account, and the reserve counters mirror them.
///
/// # Atomicity
///
/// Every public operation follows checks-effects-interactions ordering:
///
/// 1. **Checks** — argument and state-machine validation, then ledger
///    precondition reads (balance and allowance cover the transfers).
/// 2. **Effects** — reserve and share mutation.
/// 3. **Interactions** — ledger transfers.
///
/// A re-entrant observer during the interaction phase therefore sees
/// already-updated internal state, never a stale image.  Because the
/// preconditions were read under the same exclusive borrow, a conforming
/// ledger cannot fail after effects; if a non-conforming one does, the
/// facade restores the pre-effect snapshot (and refunds a completed
/// first pull), so the operation is all-or-nothing either way.
///
/// # Examples
///
/// ```
/// use xyk_exchange::config::ExchangeConfig;
/// use xyk_exchange::domain::{AccountId, Amount, AssetId, AssetSide, FeeBps, SwapRequest};
/// use xyk_exchange::exchange::PairExchange;
/// use xyk_exchange::ledger::{AssetLedger, InMemoryLedger};
///
/// let asset_a = AssetId::from_bytes([1u8; 32]);
/// let asset_b = AssetId::from_bytes([2u8; 32]);
/// let pool = AccountId::from_bytes([0xEE; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&asset_a, &alice, Amount::new(1_000)).expect("mint");
/// ledger.mint(&asset_b, &alice, Amount::new(2_000)).expect("mint");
/// ledger.approve(&asset_a, &alice, &pool, Amount::new(1_000)).expect("approve");
/// ledger.approve(&asset_b, &alice, &pool, Amount::new(2_000)).expect("approve");
///
/// let mut exchange = PairExchange::new(ExchangeConfig::new(pool, FeeBps::STANDARD));
/// exchange.initialize(asset_a, asset_b).expect("initialize");
/// let minted = exchange
///     .add_liquidity(&mut ledger, &alice, Amount::new(100), Amount::new(200))
///     .expect("deposit");
/// assert!(!minted.is_zero());
///
/// let request = SwapRequest::new(Amount::new(10), AssetSide::A).expect("request");
/// let outcome = exchange.swap(&mut ledger, &alice, &request).expect("swap");
/// assert!(!outcome.amount_out().is_zero());
/// ```
#[derive(Debug, Clone)]
pub struct PairExchange {
    config: ExchangeConfig,
    engine: SwapEngine,
    pool: Pool,
    liquidity: LiquidityAccounting,
}

impl PairExchange {
    /// Creates an uninitialized exchange from its configuration.
    #[must_use]
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            engine: SwapEngine::new(config.fee()),
            pool: Pool::new(),
            liquidity: LiquidityAccounting::new(),
        }
    }

    /// Returns the reserve-custody account callers must `approve`.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.config.pool_account()
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeBps {
        self.config.fee()
    }

    /// Returns `true` once [`initialize`](Self::initialize) has
    /// succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.pool.is_initialized()
    }

    /// Binds the exchange to its asset pair.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::AlreadyInitialized`] on a second call.
    /// - [`ExchangeError::InvalidAsset`] if the identifiers are equal.
    pub fn initialize(&mut self, asset_a: AssetId, asset_b: AssetId) -> Result<()> {
        self.pool.initialize(asset_a, asset_b)?;
        #[cfg(feature = "tracing")]
        tracing::debug!("exchange initialized");
        Ok(())
    }

    /// Returns both reserves as `(reserve_a, reserve_b)`.
    ///
    /// A pure read: `(0, 0)` before initialization or when drained.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        self.pool.reserves()
    }

    /// Returns `owner`'s liquidity position.
    #[must_use]
    pub fn shares_of(&self, owner: &AccountId) -> Shares {
        self.liquidity.shares_of(owner)
    }

    /// Returns the outstanding share total.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.liquidity.total_shares()
    }

    /// Prices `request` against current reserves without touching any
    /// state.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::NotInitialized`] before `initialize`.
    /// - Everything [`SwapEngine::quote`] returns.
    pub fn quote_swap(&self, request: &SwapRequest) -> Result<SwapOutcome> {
        self.pool.assets()?;
        self.engine.quote(
            self.pool.reserve(request.side_in()),
            self.pool.reserve(request.side_out()),
            request.amount_in(),
        )
    }

    /// Deposits `(amount_a, amount_b)` and mints liquidity shares.
    ///
    /// The first deposit sets the reserve ratio and mints the geometric
    /// mean of the amounts; later deposits must track the current ratio.
    /// Both amounts are pulled from `caller` via `transfer_from`, so the
    /// pool account needs allowance over each.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::NotInitialized`] before `initialize`.
    /// - [`ExchangeError::InvalidAmount`] if either amount is zero or
    ///   the deposit mints no shares.
    /// - [`ExchangeError::RatioMismatch`] if the deposit diverges from
    ///   the reserve ratio.
    /// - [`ExchangeError::InsufficientAllowance`] /
    ///   [`ExchangeError::InsufficientBalance`] from the ledger checks.
    ///
    /// State is unchanged on every error.
    pub fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares> {
        // Checks.
        let pair = *self.pool.assets()?;
        let (reserve_a, reserve_b) = self.pool.reserves();
        let minted = self
            .liquidity
            .shares_for_deposit(reserve_a, reserve_b, amount_a, amount_b)?;
        let pool_account = self.config.pool_account();
        check_spendable(ledger, &pair.asset_a(), caller, &pool_account, amount_a)?;
        check_spendable(ledger, &pair.asset_b(), caller, &pool_account, amount_b)?;

        // Effects.
        let snapshot = self.snapshot();
        if let Err(err) = self.apply_deposit(caller, amount_a, amount_b, minted) {
            self.restore(snapshot);
            return Err(err);
        }

        // Interactions.
        if let Err(err) = ledger.transfer_from(
            &pair.asset_a(),
            caller,
            &pool_account,
            &pool_account,
            amount_a,
        ) {
            self.restore(snapshot);
            return Err(err);
        }
        if let Err(err) = ledger.transfer_from(
            &pair.asset_b(),
            caller,
            &pool_account,
            &pool_account,
            amount_b,
        ) {
            self.restore(snapshot);
            // The pool already holds the A-side deposit; hand it back.
            ledger.transfer(&pair.asset_a(), &pool_account, caller, amount_a)?;
            return Err(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            amount_a = amount_a.get(),
            amount_b = amount_b.get(),
            minted = minted.get(),
            "liquidity added"
        );
        Ok(minted)
    }

    /// Burns `shares` and pays out the proportional slice of both
    /// reserves, floored.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::NotInitialized`] before `initialize`.
    /// - [`ExchangeError::InvalidAmount`] if `shares` is zero.
    /// - [`ExchangeError::InsufficientShares`] if `shares` exceeds the
    ///   caller's position.
    ///
    /// State is unchanged on every error.
    pub fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        shares: Shares,
    ) -> Result<(Amount, Amount)> {
        // Checks.
        let pair = *self.pool.assets()?;
        if shares > self.liquidity.shares_of(caller) {
            return Err(ExchangeError::InsufficientShares);
        }
        let (reserve_a, reserve_b) = self.pool.reserves();
        let (out_a, out_b) = self
            .liquidity
            .amounts_for_withdrawal(reserve_a, reserve_b, shares)?;
        let pool_account = self.config.pool_account();

        // Effects.
        let snapshot = self.snapshot();
        if let Err(err) = self.apply_withdrawal(caller, out_a, out_b, shares) {
            self.restore(snapshot);
            return Err(err);
        }

        // Interactions.
        if let Err(err) = ledger.transfer(&pair.asset_a(), &pool_account, caller, out_a) {
            self.restore(snapshot);
            return Err(err);
        }
        if let Err(err) = ledger.transfer(&pair.asset_b(), &pool_account, caller, out_b) {
            self.restore(snapshot);
            // Claw the A-side payout back before surfacing the error.
            ledger.transfer(&pair.asset_a(), caller, &pool_account, out_a)?;
            return Err(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            burned = shares.get(),
            amount_a = out_a.get(),
            amount_b = out_b.get(),
            "liquidity removed"
        );
        Ok((out_a, out_b))
    }

    /// Swaps `request.amount_in` of the sold side for the bought side at
    /// the fee-adjusted constant-product price.
    ///
    /// The input is pulled from `caller` via `transfer_from` (allowance
    /// required); the output is paid from the pool account.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::NotInitialized`] before `initialize`.
    /// - Everything [`SwapEngine::quote`] returns.
    /// - [`ExchangeError::InsufficientAllowance`] /
    ///   [`ExchangeError::InsufficientBalance`] from the ledger checks.
    ///
    /// State is unchanged on every error.
    pub fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &AccountId,
        request: &SwapRequest,
    ) -> Result<SwapOutcome> {
        // Checks.
        let pair = *self.pool.assets()?;
        let asset_in = pair.asset(request.side_in());
        let asset_out = pair.asset(request.side_out());
        let pool_account = self.config.pool_account();
        check_spendable(ledger, &asset_in, caller, &pool_account, request.amount_in())?;

        // Effects (quote + reserve commit; leaves the pool unchanged on error).
        let snapshot = self.snapshot();
        let outcome = self.engine.execute(&mut self.pool, request)?;

        // Interactions.
        if let Err(err) = ledger.transfer_from(
            &asset_in,
            caller,
            &pool_account,
            &pool_account,
            outcome.amount_in(),
        ) {
            self.restore(snapshot);
            return Err(err);
        }
        if let Err(err) = ledger.transfer(&asset_out, &pool_account, caller, outcome.amount_out())
        {
            self.restore(snapshot);
            // Return the pulled input before surfacing the error.
            ledger.transfer(&asset_in, &pool_account, caller, outcome.amount_in())?;
            return Err(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            side_in = %request.side_in(),
            amount_in = outcome.amount_in().get(),
            amount_out = outcome.amount_out().get(),
            fee = outcome.fee().get(),
            "swap settled"
        );
        Ok(outcome)
    }

    fn apply_deposit(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
        minted: Shares,
    ) -> Result<()> {
        self.pool.apply_delta(
            ReserveDelta::Credit(amount_a),
            ReserveDelta::Credit(amount_b),
        )?;
        self.liquidity.mint(caller, minted)
    }

    fn apply_withdrawal(
        &mut self,
        caller: &AccountId,
        out_a: Amount,
        out_b: Amount,
        shares: Shares,
    ) -> Result<()> {
        self.pool
            .apply_delta(ReserveDelta::Debit(out_a), ReserveDelta::Debit(out_b))?;
        self.liquidity.burn(caller, shares)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pool: self.pool,
            liquidity: self.liquidity.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.pool = snapshot.pool;
        self.liquidity = snapshot.liquidity;
    }
}

/// Verifies that `spender` may pull `amount` of `asset` from `owner`.
fn check_spendable<L: AssetLedger>(
    ledger: &L,
    asset: &AssetId,
    owner: &AccountId,
    spender: &AccountId,
    amount: Amount,
) -> Result<()> {
    if ledger.allowance(asset, owner, spender) < amount {
        return Err(ExchangeError::InsufficientAllowance);
    }
    if ledger.balance_of(asset, owner) < amount {
        return Err(ExchangeError::InsufficientBalance);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssetSide;
    use crate::ledger::InMemoryLedger;

    fn asset(byte: u8) -> AssetId {
        AssetId::from_bytes([byte; 32])
    }

    fn account(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn pool_account() -> AccountId {
        account(0xEE)
    }

    fn new_exchange() -> PairExchange {
        PairExchange::new(ExchangeConfig::new(pool_account(), FeeBps::STANDARD))
    }

    /// Exchange + ledger with `caller` funded and fully approved.
    fn funded_setup(balance_a: u128, balance_b: u128) -> (PairExchange, InMemoryLedger, AccountId) {
        let caller = account(10);
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(&asset(1), &caller, Amount::new(balance_a)) else {
            panic!("mint a");
        };
        let Ok(()) = ledger.mint(&asset(2), &caller, Amount::new(balance_b)) else {
            panic!("mint b");
        };
        let Ok(()) = ledger.approve(&asset(1), &caller, &pool_account(), Amount::MAX) else {
            panic!("approve a");
        };
        let Ok(()) = ledger.approve(&asset(2), &caller, &pool_account(), Amount::MAX) else {
            panic!("approve b");
        };
        let mut exchange = new_exchange();
        let Ok(()) = exchange.initialize(asset(1), asset(2)) else {
            panic!("initialize");
        };
        (exchange, ledger, caller)
    }

    // -- Lifecycle ------------------------------------------------------------

    #[test]
    fn operations_before_initialize_rejected() {
        let mut exchange = new_exchange();
        let mut ledger = InMemoryLedger::new();
        let caller = account(10);

        assert_eq!(
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(1), Amount::new(1)),
            Err(ExchangeError::NotInitialized)
        );
        assert_eq!(
            exchange.remove_liquidity(&mut ledger, &caller, Shares::new(1)),
            Err(ExchangeError::NotInitialized)
        );
        let Ok(request) = SwapRequest::new(Amount::new(1), AssetSide::A) else {
            panic!("valid request");
        };
        assert_eq!(
            exchange.swap(&mut ledger, &caller, &request),
            Err(ExchangeError::NotInitialized)
        );
        assert_eq!(
            exchange.quote_swap(&request),
            Err(ExchangeError::NotInitialized)
        );
    }

    #[test]
    fn reserves_read_is_pure_before_initialize() {
        let exchange = new_exchange();
        assert_eq!(exchange.reserves(), (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn double_initialize_rejected() {
        let (mut exchange, _, _) = funded_setup(1_000, 1_000);
        assert_eq!(
            exchange.initialize(asset(1), asset(2)),
            Err(ExchangeError::AlreadyInitialized)
        );
    }

    // -- add_liquidity ---------------------------------------------------------

    #[test]
    fn first_deposit_sets_reserves_and_mints_sqrt() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(141));
        assert_eq!(exchange.reserves(), (Amount::new(100), Amount::new(200)));
        assert_eq!(exchange.shares_of(&caller), Shares::new(141));
        assert_eq!(exchange.total_shares(), Shares::new(141));
        // Ledger settled: caller debited, pool credited.
        assert_eq!(ledger.balance_of(&asset(1), &caller), Amount::new(900));
        assert_eq!(ledger.balance_of(&asset(2), &caller), Amount::new(800));
        assert_eq!(
            ledger.balance_of(&asset(1), &pool_account()),
            Amount::new(100)
        );
        assert_eq!(
            ledger.balance_of(&asset(2), &pool_account()),
            Amount::new(200)
        );
    }

    #[test]
    fn deposit_without_allowance_fails_atomically() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(()) = ledger.approve(&asset(2), &caller, &pool_account(), Amount::ZERO) else {
            panic!("approve");
        };
        let result =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200));
        assert_eq!(result, Err(ExchangeError::InsufficientAllowance));
        // Nothing moved anywhere.
        assert_eq!(exchange.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(exchange.total_shares(), Shares::ZERO);
        assert_eq!(ledger.balance_of(&asset(1), &caller), Amount::new(1_000));
        assert_eq!(
            ledger.balance_of(&asset(1), &pool_account()),
            Amount::ZERO
        );
    }

    #[test]
    fn deposit_without_balance_fails_atomically() {
        let (mut exchange, mut ledger, caller) = funded_setup(50, 1_000);
        let result =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200));
        assert_eq!(result, Err(ExchangeError::InsufficientBalance));
        assert_eq!(exchange.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(ledger.balance_of(&asset(1), &caller), Amount::new(50));
    }

    #[test]
    fn proportional_second_deposit() {
        let (mut exchange, mut ledger, caller) = funded_setup(10_000, 10_000);
        let Ok(_) = exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("first deposit");
        };
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(10), Amount::new(20))
        else {
            panic!("second deposit");
        };
        // 141 * 10 / 100 = 14
        assert_eq!(minted, Shares::new(14));
        assert_eq!(exchange.reserves(), (Amount::new(110), Amount::new(220)));
        assert_eq!(exchange.total_shares(), Shares::new(155));
    }

    #[test]
    fn mismatched_second_deposit_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(10_000, 10_000);
        let Ok(_) = exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("first deposit");
        };
        let result =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(100));
        assert_eq!(result, Err(ExchangeError::RatioMismatch));
        assert_eq!(exchange.reserves(), (Amount::new(100), Amount::new(200)));
    }

    #[test]
    fn zero_deposit_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let result = exchange.add_liquidity(&mut ledger, &caller, Amount::ZERO, Amount::new(5));
        assert!(matches!(result, Err(ExchangeError::InvalidAmount(_))));
    }

    // -- remove_liquidity --------------------------------------------------------

    #[test]
    fn remove_liquidity_pays_out_and_burns() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let Ok((out_a, out_b)) = exchange.remove_liquidity(&mut ledger, &caller, minted) else {
            panic!("withdrawal");
        };
        // Full withdrawal returns the full reserves.
        assert_eq!(out_a, Amount::new(100));
        assert_eq!(out_b, Amount::new(200));
        assert_eq!(exchange.reserves(), (Amount::ZERO, Amount::ZERO));
        assert_eq!(exchange.total_shares(), Shares::ZERO);
        assert_eq!(ledger.balance_of(&asset(1), &caller), Amount::new(1_000));
        assert_eq!(ledger.balance_of(&asset(2), &caller), Amount::new(1_000));
    }

    #[test]
    fn remove_more_than_position_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let too_many = Shares::new(minted.get() + 1);
        let result = exchange.remove_liquidity(&mut ledger, &caller, too_many);
        assert_eq!(result, Err(ExchangeError::InsufficientShares));
        // Reserves untouched.
        assert_eq!(exchange.reserves(), (Amount::new(100), Amount::new(200)));
        assert_eq!(exchange.shares_of(&caller), minted);
    }

    #[test]
    fn remove_from_stranger_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(_) = exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let stranger = account(99);
        let result = exchange.remove_liquidity(&mut ledger, &stranger, Shares::new(1));
        assert_eq!(result, Err(ExchangeError::InsufficientShares));
    }

    // -- swap --------------------------------------------------------------------

    #[test]
    fn swap_settles_both_ledger_legs() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(_) = exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let balance_a_before = ledger.balance_of(&asset(1), &caller);
        let balance_b_before = ledger.balance_of(&asset(2), &caller);

        let Ok(request) = SwapRequest::new(Amount::new(10), AssetSide::A) else {
            panic!("valid request");
        };
        let Ok(outcome) = exchange.swap(&mut ledger, &caller, &request) else {
            panic!("swap");
        };

        // Reserves: sold side up by the full input, bought side down by the output.
        assert_eq!(
            exchange.reserves(),
            (
                Amount::new(110),
                Amount::new(200 - outcome.amount_out().get())
            )
        );
        // Caller: input asset down by amount_in, output asset up by amount_out.
        assert_eq!(
            ledger.balance_of(&asset(1), &caller),
            Amount::new(balance_a_before.get() - 10)
        );
        assert_eq!(
            ledger.balance_of(&asset(2), &caller),
            Amount::new(balance_b_before.get() + outcome.amount_out().get())
        );
    }

    #[test]
    fn swap_quote_matches_execution() {
        let (mut exchange, mut ledger, caller) = funded_setup(10_000, 10_000);
        let Ok(_) = exchange.add_liquidity(
            &mut ledger,
            &caller,
            Amount::new(1_000),
            Amount::new(2_000),
        ) else {
            panic!("deposit");
        };
        let Ok(request) = SwapRequest::new(Amount::new(100), AssetSide::B) else {
            panic!("valid request");
        };
        let Ok(quoted) = exchange.quote_swap(&request) else {
            panic!("quote");
        };
        let Ok(executed) = exchange.swap(&mut ledger, &caller, &request) else {
            panic!("swap");
        };
        assert_eq!(quoted, executed);
    }

    #[test]
    fn swap_without_allowance_fails_atomically() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(_) = exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let Ok(()) = ledger.approve(&asset(1), &caller, &pool_account(), Amount::ZERO) else {
            panic!("approve");
        };
        let Ok(request) = SwapRequest::new(Amount::new(10), AssetSide::A) else {
            panic!("valid request");
        };
        let result = exchange.swap(&mut ledger, &caller, &request);
        assert_eq!(result, Err(ExchangeError::InsufficientAllowance));
        // Reserves and balances untouched.
        assert_eq!(exchange.reserves(), (Amount::new(100), Amount::new(200)));
        assert_eq!(ledger.balance_of(&asset(1), &caller), Amount::new(900));
    }

    #[test]
    fn swap_on_unfunded_exchange_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(request) = SwapRequest::new(Amount::new(10), AssetSide::A) else {
            panic!("valid request");
        };
        assert_eq!(
            exchange.swap(&mut ledger, &caller, &request),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    #[test]
    fn swap_on_drained_exchange_rejected() {
        let (mut exchange, mut ledger, caller) = funded_setup(1_000, 1_000);
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &caller, Amount::new(100), Amount::new(200))
        else {
            panic!("deposit");
        };
        let Ok(_) = exchange.remove_liquidity(&mut ledger, &caller, minted) else {
            panic!("withdrawal");
        };
        let Ok(request) = SwapRequest::new(Amount::new(10), AssetSide::A) else {
            panic!("valid request");
        };
        assert_eq!(
            exchange.swap(&mut ledger, &caller, &request),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    // -- Conservation -------------------------------------------------------------

    #[test]
    fn add_then_remove_returns_deposit_within_one_unit() {
        let (mut exchange, mut ledger, caller) = funded_setup(100_000, 100_000);
        let Ok(_) = exchange.add_liquidity(
            &mut ledger,
            &caller,
            Amount::new(1_000),
            Amount::new(3_000),
        ) else {
            panic!("first deposit");
        };
        // An awkward ratio for the second provider.
        let other = account(20);
        let Ok(()) = ledger.mint(&asset(1), &other, Amount::new(777)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.mint(&asset(2), &other, Amount::new(2_331)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.approve(&asset(1), &other, &pool_account(), Amount::MAX) else {
            panic!("approve");
        };
        let Ok(()) = ledger.approve(&asset(2), &other, &pool_account(), Amount::MAX) else {
            panic!("approve");
        };
        let Ok(minted) =
            exchange.add_liquidity(&mut ledger, &other, Amount::new(777), Amount::new(2_331))
        else {
            panic!("second deposit");
        };
        let Ok((out_a, out_b)) = exchange.remove_liquidity(&mut ledger, &other, minted) else {
            panic!("withdrawal");
        };
        assert!(777 - out_a.get() <= 1);
        assert!(2_331 - out_b.get() <= 1);
    }
}
