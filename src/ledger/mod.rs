use rust_decimal::Decimal;
use thiserror::Error;

use crate::{account::AccountError, store::StoreError};

pub mod orchestrator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error("Cannot transfer to the same account")]
    SelfTransfer,
}

/// Synchronous call surface used by whatever transport sits in front of the
/// ledger. Every failure is returned to the caller; nothing is retried.
pub trait Ledger: Send + Sync {
    /// Adds a strictly positive `amount`, creating the account if needed.
    fn credit(&self, account: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Moves a strictly positive `amount` from an existing account to another
    /// one, creating the destination if needed. Either both balances change or
    /// neither does.
    fn transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Never fails: an account that was never referenced is created with a zero
    /// balance.
    fn balance(&self, account: &str) -> Decimal;
}
