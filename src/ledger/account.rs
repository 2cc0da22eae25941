use std::borrow::Cow;
use std::io::Write;

use super::config::{Encapsulation, HistoryMode, InitialBalancePolicy, LedgerConfig, ValidationPolicy};
use super::error::{Error, LedgerError};
use super::transaction::{TransactionEntry, TransactionKind};
use super::Decimal;

/// The operations every account flavour exposes to drivers and decorators.
pub trait Ledger {
    fn owner(&self) -> &str;

    fn balance(&self) -> Decimal;

    fn deposit(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError>;

    fn withdraw(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError>;

    /// Write the owner and balance to `out`. Never changes state.
    fn display_balance<W: Write>(&self, out: W) -> std::io::Result<()>;
}

/// Before/after state of a single deposit or withdrawal.
///
/// Returned for every applied operation, and for rejected ones under the lenient
/// policy, so callers (and observers) can see what happened without reading the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    kind: TransactionKind,
    amount: Decimal,
    balance_before: Decimal,
    balance_after: Decimal,
    rejection: Option<LedgerError>,
    low_balance: bool,
}

impl OperationReport {
    pub(super) fn applied(
        kind: TransactionKind,
        amount: Decimal,
        balance_before: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            kind,
            amount,
            balance_before,
            balance_after,
            rejection: None,
            low_balance: false,
        }
    }

    pub(super) fn rejected(
        kind: TransactionKind,
        amount: Decimal,
        balance: Decimal,
        rejection: LedgerError,
    ) -> Self {
        Self {
            kind,
            amount,
            balance_before: balance,
            balance_after: balance,
            rejection: Some(rejection),
            low_balance: false,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_before(&self) -> Decimal {
        self.balance_before
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    /// The reason a lenient account ignored the operation
    pub fn rejection(&self) -> Option<&LedgerError> {
        self.rejection.as_ref()
    }

    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }

    /// Whether a withdrawal left the balance under the configured threshold
    pub fn is_low_balance(&self) -> bool {
        self.low_balance
    }
}

/// A single owner's account.
///
/// Balance changes only through [`Ledger::deposit`] and [`Ledger::withdraw`];
/// how invalid requests are handled depends on the account's [`LedgerConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    owner: String,
    balance: Decimal,
    config: LedgerConfig,
    history: Vec<TransactionEntry>,
}

impl Account {
    /// Open an account. A negative `initial_balance` is kept or clamped to zero
    /// depending on `config.initial_balance`.
    pub fn new(owner: impl Into<String>, initial_balance: Decimal, config: LedgerConfig) -> Self {
        let owner = owner.into();
        let balance = match config.initial_balance {
            InitialBalancePolicy::ClampToZero if initial_balance < Decimal::ZERO => {
                log::warn!(
                    "Initial balance for {owner} cannot be negative ({initial_balance}), setting to 0"
                );
                Decimal::ZERO
            }
            _ => initial_balance,
        };
        log::debug!("Opened account for {owner} with balance {balance}");
        Self {
            owner,
            balance,
            config,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the successful operations in the order they were applied.
    ///
    /// With [`Encapsulation::Public`] this borrows the internal log; with
    /// [`Encapsulation::CopyOnRead`] it is an owned copy the caller may change freely.
    /// Empty when history is disabled.
    pub fn transaction_history(&self) -> Cow<'_, [TransactionEntry]> {
        match self.config.encapsulation {
            Encapsulation::Public => Cow::Borrowed(self.history.as_slice()),
            Encapsulation::CopyOnRead => Cow::Owned(self.history.clone()),
        }
    }

    /// Write the transaction history to any sink as CSV (`kind,amount`).
    pub fn export_history<W: Write>(&self, writer: W) -> Result<(), Error> {
        log::info!(
            "Exporting {} transactions for {}",
            self.history.len(),
            self.owner
        );

        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in &self.history {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Check `amount` against the policy and the balance and return the balance
    /// the operation would leave.
    fn validate(&self, kind: TransactionKind, amount: Decimal) -> Result<Decimal, LedgerError> {
        let invalid_amount = match self.config.validation {
            ValidationPolicy::Lenient => amount < Decimal::ZERO,
            ValidationPolicy::Strict => amount <= Decimal::ZERO,
        };
        if invalid_amount {
            return Err(LedgerError::NegativeAmount { kind, amount });
        }

        if kind == TransactionKind::Withdraw && amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }

        let next_balance = match kind {
            TransactionKind::Deposit => self.balance.checked_add(amount),
            TransactionKind::Withdraw => self.balance.checked_sub(amount),
        };
        next_balance.ok_or(LedgerError::Overflow {
            kind,
            balance: self.balance,
            amount,
        })
    }

    fn apply(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<OperationReport, LedgerError> {
        log::trace!("[{kind}] owner={} amount={amount}", self.owner);
        let balance_before = self.balance;

        self.balance = match self.validate(kind, amount) {
            Ok(next_balance) => next_balance,
            Err(e) => {
                log::debug!("[{kind}] owner={} - Rejected: {e}", self.owner);
                return match self.config.validation {
                    ValidationPolicy::Lenient => {
                        Ok(OperationReport::rejected(kind, amount, balance_before, e))
                    }
                    ValidationPolicy::Strict => Err(e),
                };
            }
        };
        if self.config.history == HistoryMode::Enabled {
            self.history.push(TransactionEntry::new(kind, amount));
        }
        #[cfg(debug_assertions)]
        self.assert_invariant(kind);

        let mut report = OperationReport::applied(kind, amount, balance_before, self.balance);
        if kind == TransactionKind::Withdraw {
            if let Some(threshold) = self.config.low_balance_threshold {
                if self.balance < threshold {
                    log::warn!(
                        "Balance for {} is below {threshold}: {}",
                        self.owner,
                        self.balance
                    );
                    report.low_balance = true;
                }
            }
        }

        log::trace!(
            "[{kind}] owner={} amount={amount} -> new_balance={}",
            self.owner,
            self.balance
        );
        Ok(report)
    }

    /// A withdrawal never takes the balance below zero.
    #[cfg(debug_assertions)]
    fn assert_invariant(&self, kind: TransactionKind) {
        if kind == TransactionKind::Withdraw {
            debug_assert!(
                self.balance >= Decimal::ZERO,
                "Invariant violated: withdrawal left balance at {}",
                self.balance
            );
        }
    }
}

impl Ledger for Account {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn balance(&self) -> Decimal {
        self.balance
    }

    fn deposit(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.apply(TransactionKind::Deposit, amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.apply(TransactionKind::Withdraw, amount)
    }

    fn display_balance<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{self}")
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Account balance for {} is: {}", self.owner, self.balance)
    }
}
