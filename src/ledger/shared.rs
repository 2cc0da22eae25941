use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use super::account::{Account, Ledger, OperationReport};
use super::error::LedgerError;
use super::transaction::TransactionKind;
use super::Decimal;

/// An account that may be used from several threads at once.
pub trait ConcurrentLedger: Send + Sync {
    fn deposit(&self, amount: Decimal) -> Result<OperationReport, LedgerError>;

    fn withdraw(&self, amount: Decimal) -> Result<OperationReport, LedgerError>;

    fn balance(&self) -> Decimal;
}

/// Reads the balance, waits `latency`, then writes back the new value.
///
/// The lock only guards the individual read and the individual write, so two
/// operations overlapping inside the delay both start from the same balance and
/// one of the updates is lost. Kept to demonstrate the lost update; use
/// [`SyncAccount`] for real concurrent access.
#[derive(Debug)]
pub struct RacyAccount {
    owner: String,
    balance: Mutex<Decimal>,
    latency: Duration,
}

impl RacyAccount {
    pub fn new(owner: impl Into<String>, initial_balance: Decimal, latency: Duration) -> Self {
        Self {
            owner: owner.into(),
            balance: Mutex::new(initial_balance),
            latency,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn read_delay_write(
        &self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<OperationReport, LedgerError> {
        let balance_before = *self.balance.lock();

        if amount <= Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { kind, amount });
        }
        if kind == TransactionKind::Withdraw && amount > balance_before {
            return Err(LedgerError::InsufficientFunds {
                balance: balance_before,
                requested: amount,
            });
        }

        let balance_after = match kind {
            TransactionKind::Deposit => balance_before.checked_add(amount),
            TransactionKind::Withdraw => balance_before.checked_sub(amount),
        }
        .ok_or(LedgerError::Overflow {
            kind,
            balance: balance_before,
            amount,
        })?;

        thread::sleep(self.latency);
        *self.balance.lock() = balance_after;

        log::trace!(
            "[{kind}] owner={} amount={amount} read={balance_before} wrote={balance_after}",
            self.owner
        );
        Ok(OperationReport::applied(
            kind,
            amount,
            balance_before,
            balance_after,
        ))
    }
}

impl ConcurrentLedger for RacyAccount {
    fn deposit(&self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.read_delay_write(TransactionKind::Deposit, amount)
    }

    fn withdraw(&self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.read_delay_write(TransactionKind::Withdraw, amount)
    }

    fn balance(&self) -> Decimal {
        *self.balance.lock()
    }
}

/// An [`Account`] behind a mutex held for the whole read-delay-write,
/// so deposits and withdrawals on the same account never interleave.
#[derive(Debug)]
pub struct SyncAccount {
    inner: Mutex<Account>,
    latency: Duration,
}

impl SyncAccount {
    pub fn new(account: Account, latency: Duration) -> Self {
        Self {
            inner: Mutex::new(account),
            latency,
        }
    }

    pub fn into_inner(self) -> Account {
        self.inner.into_inner()
    }

    fn serialized<F>(&self, op: F) -> Result<OperationReport, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<OperationReport, LedgerError>,
    {
        let mut account = self.inner.lock();
        thread::sleep(self.latency);
        op(&mut account)
    }
}

impl ConcurrentLedger for SyncAccount {
    fn deposit(&self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.serialized(|account| account.deposit(amount))
    }

    fn withdraw(&self, amount: Decimal) -> Result<OperationReport, LedgerError> {
        self.serialized(|account| account.withdraw(amount))
    }

    fn balance(&self) -> Decimal {
        self.inner.lock().balance()
    }
}

/// Start `workers` threads together, each depositing `amount` once into `ledger`.
/// Returns every worker's result in spawn order.
pub fn concurrent_deposits<L: ConcurrentLedger>(
    ledger: &L,
    amount: Decimal,
    workers: usize,
) -> Vec<Result<OperationReport, LedgerError>> {
    let barrier = Barrier::new(workers);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    ledger.deposit(amount)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
