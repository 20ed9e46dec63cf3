use parking_lot::Mutex;
use rust_decimal::{Decimal, prelude::Zero};
use tracing::{debug, warn};

use crate::{
    account::{Account, AccountError},
    config::{LedgerConfig, LockingStrategy},
    store::{AccountStore, in_memory_store::InMemoryAccountStore},
};

use super::{Ledger, LedgerError};

pub struct TransferOrchestrator<S = InMemoryAccountStore> {
    store: S,
    locking: LockingStrategy,
    transfer_lock: Mutex<()>,
}

impl TransferOrchestrator {
    pub fn in_memory(config: LedgerConfig) -> Self {
        Self::new(InMemoryAccountStore::new(), config)
    }
}

impl Default for TransferOrchestrator {
    fn default() -> Self {
        Self::in_memory(LedgerConfig::default())
    }
}

impl<S> TransferOrchestrator<S>
where
    S: AccountStore,
{
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            store,
            locking: config.locking,
            transfer_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Zero is rejected here, even though accounts themselves accept it.
    fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::zero() {
            return Err(AccountError::NegativeAmount.into());
        }
        Ok(())
    }

    /// Debits `from` and credits `to` while holding both account locks, taken in
    /// ascending id order. If the credit fails the debit is reverted before the
    /// locks are released.
    fn move_funds(from: &Account, to: &Account, amount: Decimal) -> Result<(), LedgerError> {
        let (mut from_guard, mut to_guard) = if from.id() < to.id() {
            let from_guard = from.lock();
            (from_guard, to.lock())
        } else {
            let to_guard = to.lock();
            (from.lock(), to_guard)
        };

        let debit = from_guard.debit(amount)?;
        if let Err(err) = to_guard.credit(amount) {
            from_guard.revert(&debit);
            warn!(
                from = from_guard.id(),
                to = to_guard.id(),
                amount = %debit.amount(),
                restored = %from_guard.balance(),
                %err,
                "transfer rolled back"
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl<S> Ledger for TransferOrchestrator<S>
where
    S: AccountStore,
{
    fn credit(&self, account: &str, amount: Decimal) -> Result<(), LedgerError> {
        Self::ensure_positive(amount)?;
        let acc = self.store.get_or_create(account);
        acc.credit(amount)?;
        self.store.put(acc);
        debug!(account, %amount, "credited");
        Ok(())
    }

    fn transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        Self::ensure_positive(amount)?;
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }

        let _serialized = match self.locking {
            LockingStrategy::Global => Some(self.transfer_lock.lock()),
            LockingStrategy::Ordered => None,
        };

        let from_acc = self.store.get(from)?;
        let to_acc = self.store.get_or_create(to);
        Self::move_funds(&from_acc, &to_acc, amount)?;

        self.store.put(from_acc);
        self.store.put(to_acc);
        debug!(from, to, %amount, "transferred");
        Ok(())
    }

    fn balance(&self, account: &str) -> Decimal {
        self.store.get_or_create(account).balance()
    }
}
