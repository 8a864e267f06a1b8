use rust_decimal::Decimal;
use std::sync::Arc;

use crate::notification::Notifier;
use crate::stores::{Account, AccountPair, AccountsStore};
use crate::{Amount, Error};

/// Ledger service: account bookkeeping plus money transfers.
///
/// Holds the store and the notifier it was built with; both are shared so
/// the engine can be cloned cheaply across request handlers.
#[derive(Clone)]
pub struct Engine {
    accounts: Arc<AccountsStore>,
    notifier: Arc<dyn Notifier>,
}

impl Engine {
    pub fn new(accounts: Arc<AccountsStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { accounts, notifier }
    }

    pub fn accounts(&self) -> &AccountsStore {
        &self.accounts
    }

    pub fn create_account(&self, account: Account) -> Result<(), Error> {
        self.accounts.create_account(account)
    }

    pub fn get_account(&self, id: &str) -> Option<Account> {
        self.accounts.get_account(id)
    }

    /// Moves `amount` from one account to another.
    ///
    /// The balance check and both writes happen under the locks of both
    /// accounts, so concurrent transfers sharing an account are serialized and
    /// a caller never sees only half of a transfer. On failure nothing changes
    /// and no notification is sent. The notification goes out after the locks
    /// are released and its outcome does not affect the result.
    pub fn transfer_money(&self, from_id: &str, to_id: &str, amount: Amount) -> Result<(), Error> {
        let amount = amount.value();
        let credited = self
            .accounts
            .transact(from_id, to_id, |pair| match pair {
                AccountPair::Distinct { first: from, second: to } => {
                    // Both new balances are computed before either account is touched
                    let new_from_balance = debit(from, amount)?;
                    let new_to_balance = credit(to, amount)?;
                    from.balance = new_from_balance;
                    to.balance = new_to_balance;
                    Ok(to.clone())
                }
                // Debit and credit cancel out, only the funds check applies
                AccountPair::Same(account) => {
                    debit(account, amount)?;
                    Ok(account.clone())
                }
            })
            .inspect_err(|err| {
                tracing::warn!(from = from_id, to = to_id, %amount, "transfer rejected: {}", err);
            })?;

        tracing::info!(from = from_id, to = to_id, %amount, "transfer completed");
        self.notifier.notify_about_transfer(
            &credited,
            &format!("Account to: {}, amount transferred: {}", to_id, amount),
        );
        Ok(())
    }
}

/// Returns the balance `account` would have after paying `amount`.
fn debit(account: &Account, amount: Decimal) -> Result<Decimal, Error> {
    let remaining = account.balance - amount;
    if remaining < Decimal::ZERO {
        return Err(Error::InsufficientBalance(account.id.clone()));
    }
    Ok(remaining)
}

/// Returns the balance `account` would have after receiving `amount`.
fn credit(account: &Account, amount: Decimal) -> Result<Decimal, Error> {
    account
        .balance
        .checked_add(amount)
        .ok_or_else(|| Error::BalanceOverflow(account.id.clone()))
}
