use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_balance(id, Decimal::ZERO)
    }

    pub fn with_balance(id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }
}

/// Mutable access to the accounts taking part in a [`AccountsStore::transact`] call.
///
/// When both ids are the same there is only one record, and it is handed out once.
pub enum AccountPair<'a> {
    Distinct {
        first: &'a mut Account,
        second: &'a mut Account,
    },
    Same(&'a mut Account),
}

/// Thread-safe in-memory account store.
///
/// Membership is guarded by the map lock; each account's state by its own
/// mutex. Any operation touching two accounts takes their mutexes in id order.
#[derive(Default)]
pub struct AccountsStore {
    accounts: RwLock<HashMap<String, Arc<Mutex<Account>>>>,
}

impl AccountsStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new account. Fails if the id is taken or the balance is negative.
    pub fn create_account(&self, account: Account) -> Result<(), Error> {
        if account.balance < Decimal::ZERO {
            return Err(Error::NegativeBalance);
        }
        match self.write().entry(account.id.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateAccountId(account.id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    /// Returns a snapshot of the account, or `None` if it does not exist.
    pub fn get_account(&self, id: &str) -> Option<Account> {
        let entry = self.read().get(id).cloned()?;
        let account = lock(&entry).clone();
        Some(account)
    }

    /// Overwrites the stored state of an existing account.
    pub fn update_account(&self, account: Account) -> Result<(), Error> {
        if account.balance < Decimal::ZERO {
            return Err(Error::NegativeBalance);
        }
        let entry = self
            .read()
            .get(&account.id)
            .cloned()
            .ok_or_else(|| Error::AccountNotFound(account.id.clone()))?;
        *lock(&entry) = account;
        Ok(())
    }

    /// Removes every account. Only meant for resetting state between tests.
    pub fn clear_accounts(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Runs `f` while holding the locks of both accounts.
    ///
    /// Locks are always taken in lexicographic id order, so two calls over the
    /// same pair can never deadlock whichever way round they name it. Nothing
    /// is locked if either account is missing.
    pub fn transact<R, F>(&self, first: &str, second: &str, f: F) -> Result<R, Error>
    where
        F: FnOnce(AccountPair<'_>) -> Result<R, Error>,
    {
        let (first_entry, second_entry) = {
            let accounts = self.read();
            let first_entry = accounts
                .get(first)
                .cloned()
                .ok_or_else(|| Error::AccountNotFound(first.to_string()))?;
            let second_entry = accounts
                .get(second)
                .cloned()
                .ok_or_else(|| Error::AccountNotFound(second.to_string()))?;
            (first_entry, second_entry)
        };

        if Arc::ptr_eq(&first_entry, &second_entry) {
            let mut only = lock(&first_entry);
            return f(AccountPair::Same(&mut *only));
        }

        let (mut first_guard, mut second_guard) = if first < second {
            let first_guard = lock(&first_entry);
            (first_guard, lock(&second_entry))
        } else {
            let second_guard = lock(&second_entry);
            (lock(&first_entry), second_guard)
        };
        f(AccountPair::Distinct {
            first: &mut *first_guard,
            second: &mut *second_guard,
        })
    }

    // Critical sections only write after every fallible step has succeeded,
    // so a poisoned lock still holds valid data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Mutex<Account>>>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Mutex<Account>>>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock(entry: &Mutex<Account>) -> MutexGuard<'_, Account> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}
