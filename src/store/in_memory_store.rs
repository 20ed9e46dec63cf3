use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::account::{Account, AccountId};

use super::{AccountStore, StoreError};

/// The map lock is only held for lookups and inserts, never while a balance is
/// being changed.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Arc<Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, id: &str) -> Result<Arc<Account>, StoreError> {
        self.accounts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::AccountNotFound { id: id.to_owned() })
    }

    fn get_or_create(&self, id: &str) -> Arc<Account> {
        if let Some(account) = self.accounts.read().get(id) {
            return account.clone();
        }
        // Lookup is repeated under the write lock: another thread may have created
        // the account since the read lock was released.
        let mut accounts = self.accounts.write();
        accounts
            .entry(id.to_owned())
            .or_insert_with(|| {
                debug!(account = id, "account created");
                Arc::new(Account::new(id))
            })
            .clone()
    }

    fn put(&self, account: Arc<Account>) {
        self.accounts
            .write()
            .insert(account.id().to_owned(), account);
    }

    fn accounts(&self) -> Vec<Arc<Account>> {
        self.accounts.read().values().cloned().collect()
    }
}
