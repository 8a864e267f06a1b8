//! Storage layer for the ledger. Provides the shared, thread-safe
//! [`AccountsStore`] holding every [`Account`] by id.
//!
//! Current implementation keeps everything in process memory; nothing
//! survives a restart.

mod accounts;

pub use accounts::{Account, AccountPair, AccountsStore};
