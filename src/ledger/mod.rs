//! Account ledger module.
//!
//! This module contains the core account logic including:
//! - `Account` - Owner, balance and transaction history under a `LedgerConfig`
//! - `LedgerConfig` - Validation, history, encapsulation and initial balance policies
//! - `RacyAccount` / `SyncAccount` - Shared accounts for concurrent access
//! - `Error` types - Ledger and input errors

mod account;
mod config;
mod error;
mod shared;
mod transaction;

pub(crate) use rust_decimal::Decimal;

/// Monetary amount used for balances and operations.
pub type Amount = Decimal;

pub use account::{Account, Ledger, OperationReport};
pub use config::{Encapsulation, HistoryMode, InitialBalancePolicy, LedgerConfig, ValidationPolicy};
pub use error::{Error, ErrorKind, LedgerError};
pub use shared::{concurrent_deposits, ConcurrentLedger, RacyAccount, SyncAccount};
pub use transaction::{TransactionEntry, TransactionKind};
