//! A toy bank account ledger.
//!
//! One [`Account`] type covers every variant of the account through a
//! [`LedgerConfig`]: lenient or strict validation, optional transaction history,
//! borrowed or copied history reads, and the negative opening balance policy.
//! [`telemetry`] adds span recording around any [`Ledger`] without touching the
//! account itself, and [`RacyAccount`] / [`SyncAccount`] show what happens to a
//! shared balance with and without serialized updates.

mod ledger;
pub mod scenario;
mod session;
pub mod telemetry;

pub use ledger::{
    concurrent_deposits, Account, Amount, ConcurrentLedger, Encapsulation, Error, ErrorKind,
    HistoryMode, InitialBalancePolicy, Ledger, LedgerConfig, LedgerError, OperationReport,
    RacyAccount, SyncAccount, TransactionEntry, TransactionKind, ValidationPolicy,
};
pub use session::Session;
