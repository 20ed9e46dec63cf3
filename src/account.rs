use parking_lot::{RwLock, RwLockWriteGuard};
use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Credited,
    Debited,
}

/// A validated balance change. Produced by checking a credit or debit against the
/// current balance, and only then applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Balance cannot hold another {amount}")]
    BalanceOverflow { amount: Decimal },
    #[error("{amount} is below the precision the balance can keep")]
    PrecisionLoss { amount: Decimal },
}

#[derive(Debug, Default)]
struct Balance(Decimal);

impl Balance {
    fn handle_credit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::NegativeAmount);
        }
        let Some(credited) = self.0.checked_add(amount) else {
            return Err(AccountError::BalanceOverflow { amount });
        };
        // Decimal rounds past 28 significant digits instead of failing.
        if credited.checked_sub(self.0) != Some(amount) {
            return Err(AccountError::PrecisionLoss { amount });
        }
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Credited,
        })
    }

    fn handle_debit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::NegativeAmount);
        }
        if amount > self.0 {
            return Err(AccountError::InsufficientBalance);
        }
        let debited = self.0 - amount;
        if self.0.checked_sub(debited) != Some(amount) {
            return Err(AccountError::PrecisionLoss { amount });
        }
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Debited,
        })
    }

    fn apply(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Credited => self.0 += event.amount,
            AccountEventKind::Debited => self.0 -= event.amount,
        }
    }

    fn revert(&mut self, event: &AccountEvent) {
        match event.kind {
            AccountEventKind::Credited => self.0 -= event.amount,
            AccountEventKind::Debited => self.0 += event.amount,
        }
        debug_assert!(self.0 >= Decimal::zero(), "reverted below zero");
    }
}

/// Balance of a single account, guarded by its own reader/writer lock.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: RwLock<Balance>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            balance: RwLock::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance.read().0
    }

    pub fn credit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        self.lock().credit(amount)
    }

    pub fn debit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        self.lock().debit(amount)
    }

    /// Takes the exclusive lock. Everything done through the guard is invisible to
    /// readers until it is dropped.
    pub fn lock(&self) -> AccountGuard<'_> {
        AccountGuard {
            id: &self.id,
            balance: self.balance.write(),
        }
    }
}

pub struct AccountGuard<'a> {
    id: &'a str,
    balance: RwLockWriteGuard<'a, Balance>,
}

impl AccountGuard<'_> {
    pub fn id(&self) -> &str {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance.0
    }

    pub fn credit(&mut self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let event = self.balance.handle_credit(amount)?;
        self.balance.apply(&event);
        Ok(event)
    }

    pub fn debit(&mut self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let event = self.balance.handle_debit(amount)?;
        self.balance.apply(&event);
        Ok(event)
    }

    /// Undoes `event`, which must have been applied through this same guard.
    ///
    /// # Panics
    ///
    /// If the inverse change is not representable, which can only happen when the
    /// event came from somewhere else.
    pub fn revert(&mut self, event: &AccountEvent) {
        self.balance.revert(event);
    }
}
