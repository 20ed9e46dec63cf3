use std::sync::Arc;

use thiserror::Error;

use crate::account::{Account, AccountId};

pub mod in_memory_store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account `{id}` not found")]
    AccountNotFound { id: AccountId },
}

/// Directory of accounts, and the single source of truth for whether an account
/// exists. At most one [`Account`] object exists per id.
pub trait AccountStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Arc<Account>, StoreError>;

    /// Returns the account for `id`, creating a zero-balance one if there is none.
    /// Concurrent calls with the same `id` all get the same object.
    fn get_or_create(&self, id: &str) -> Arc<Account>;

    /// Records `account` under its id, replacing whatever was there.
    fn put(&self, account: Arc<Account>);

    fn accounts(&self) -> Vec<Arc<Account>>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn get(&self, id: &str) -> Result<Arc<Account>, StoreError> {
        (**self).get(id)
    }

    fn get_or_create(&self, id: &str) -> Arc<Account> {
        (**self).get_or_create(id)
    }

    fn put(&self, account: Arc<Account>) {
        (**self).put(account)
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        (**self).accounts()
    }
}
