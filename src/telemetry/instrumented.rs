use std::io::Write;

use super::observer::{Observer, SpanName, SpanRecord, Warning};
use crate::ledger::{Account, Decimal, Ledger, LedgerConfig, LedgerError, OperationReport};

/// Wraps a [`Ledger`] and records a span around each call.
///
/// Results pass through untouched, so an instrumented account behaves exactly
/// like the one it wraps.
#[derive(Debug)]
pub struct Instrumented<L, O> {
    inner: L,
    observer: O,
}

impl<O: Observer> Instrumented<Account, O> {
    /// Open an account and record its `initialize_account` span.
    pub fn open(
        owner: impl Into<String>,
        initial_balance: Decimal,
        config: LedgerConfig,
        observer: O,
    ) -> Self {
        let account = Account::new(owner, initial_balance, config);
        let clamped = account.balance() != initial_balance;
        observer.record(SpanRecord {
            name: SpanName::InitializeAccount,
            owner: account.owner().to_string(),
            amount: Some(initial_balance),
            balance_before: initial_balance,
            balance_after: account.balance(),
            success: true,
            error: None,
            warning: clamped.then_some(Warning::NegativeInitialBalance),
        });
        Self::new(account, observer)
    }
}

impl<L: Ledger, O: Observer> Instrumented<L, O> {
    pub fn new(inner: L, observer: O) -> Self {
        Self { inner, observer }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (L, O) {
        (self.inner, self.observer)
    }

    fn observe<F>(
        &mut self,
        name: SpanName,
        amount: Decimal,
        op: F,
    ) -> Result<OperationReport, LedgerError>
    where
        F: FnOnce(&mut L) -> Result<OperationReport, LedgerError>,
    {
        let balance_before = self.inner.balance();
        let result = op(&mut self.inner);

        let (error, warning) = match &result {
            Ok(report) => (
                report.rejection().map(LedgerError::kind),
                report.is_low_balance().then_some(Warning::LowBalance),
            ),
            Err(e) => (Some(e.kind()), None),
        };
        self.observer.record(SpanRecord {
            name,
            owner: self.inner.owner().to_string(),
            amount: Some(amount),
            balance_before,
            balance_after: self.inner.balance(),
            success: error.is_none(),
            error,
            warning,
        });
        result
    }
}

impl<L: Ledger, O: Observer> Ledger for Instrumented<L, O> {
    fn owner(&self) -> &str {
        self.inner.owner()
    }

    fn balance(&self) -> Decimal {
        self.inner.balance()
    }

    fn deposit(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.observe(SpanName::Deposit, amount, |ledger| ledger.deposit(amount))
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.observe(SpanName::Withdraw, amount, |ledger| ledger.withdraw(amount))
    }

    fn display_balance<W: Write>(&self, out: W) -> std::io::Result<()> {
        let balance = self.inner.balance();
        self.observer.record(SpanRecord {
            name: SpanName::DisplayBalance,
            owner: self.inner.owner().to_string(),
            amount: None,
            balance_before: balance,
            balance_after: balance,
            success: true,
            error: None,
            warning: None,
        });
        self.inner.display_balance(out)
    }
}
