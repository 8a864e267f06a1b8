//! Domain-specific errors for the ledger.
//!
//! Contains error variants for the expected failure cases:
//! - Account-related errors (duplicate id, not found)
//! - Transfer errors (insufficient balance, credit overflow)
//! - Amount validation errors (negative balance or transfer amount)
//!
//! These errors represent business outcomes the caller must handle rather
//! than technical failures. Mapping them to HTTP statuses is the job of the
//! boundary layer in [`crate::api`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Account id {0} already exists!")]
    DuplicateAccountId(String),
    #[error("Account {0} does not exist")]
    AccountNotFound(String),
    #[error("Insufficient balance in account {0}")]
    InsufficientBalance(String),
    #[error("Balance of account {0} would exceed the supported range")]
    BalanceOverflow(String),
    #[error("Initial balance must be positive.")]
    NegativeBalance,
    #[error("The amount to transfer must be a positive number.")]
    NegativeAmount,
}
