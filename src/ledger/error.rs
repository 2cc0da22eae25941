use crate::ledger::transaction::TransactionKind;
use crate::ledger::Decimal;

/// Top-level error type for the ledger and its drivers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid input: expected a number, got {input:?}")]
    InvalidInput { input: String },
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Rejected deposits and withdrawals.
/// Under the strict policy these are returned to the caller, under the lenient
/// policy they are only recorded in the operation report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Cannot {kind} an amount of {amount}")]
    NegativeAmount { kind: TransactionKind, amount: Decimal },

    #[error("Insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Cannot {kind} {amount}: balance {balance} would overflow")]
    Overflow {
        kind: TransactionKind,
        balance: Decimal,
        amount: Decimal,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NegativeAmount { .. } => ErrorKind::NegativeAmount,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

/// Stable names for ledger errors, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NegativeAmount,
    InsufficientFunds,
    Overflow,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NegativeAmount => "negative_amount",
            ErrorKind::InsufficientFunds => "insufficient_funds",
            ErrorKind::Overflow => "overflow",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
