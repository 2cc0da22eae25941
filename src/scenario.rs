//! Scripted runs used to look at the effect of each account variant.

use std::time::Duration;

use crate::ledger::{
    concurrent_deposits, Account, ConcurrentLedger, Decimal, Ledger, LedgerConfig, RacyAccount,
    LedgerError, SyncAccount, TransactionKind,
};
use crate::telemetry::{Instrumented, Observer};

/// Run the fixed effect analysis against an instrumented account:
/// open with 1000, deposit 500, withdraw 200, withdraw 2000, deposit -100,
/// then display the balance to the log.
///
/// The two invalid requests fail under either policy; the final balance is 1300.
pub fn effect_analysis<O: Observer>(config: LedgerConfig, observer: O) -> Account {
    let mut account = Instrumented::open("Test User", Decimal::from(1000), config, observer);

    let steps = [
        (TransactionKind::Deposit, 500_i64),
        (TransactionKind::Withdraw, 200),
        (TransactionKind::Withdraw, 2000),
        (TransactionKind::Deposit, -100),
    ];
    for (kind, amount) in steps {
        let amount = Decimal::from(amount);
        let result = match kind {
            TransactionKind::Deposit => account.deposit(amount),
            TransactionKind::Withdraw => account.withdraw(amount),
        };
        match result {
            Ok(report) if report.is_applied() => {
                log::debug!("[analysis] {} {amount} applied", report.kind());
            }
            Ok(report) => log::debug!(
                "[analysis] {} {amount} ignored: {:?}",
                report.kind(),
                report.rejection()
            ),
            Err(e) => log::debug!("[analysis] request failed: {e}"),
        }
    }

    let mut out = Vec::new();
    match account.display_balance(&mut out) {
        Ok(()) => log::info!("[analysis] {}", String::from_utf8_lossy(&out).trim_end()),
        Err(e) => log::warn!("[analysis] Could not render balance: {e}"),
    }

    account.into_parts().0
}

/// Outcome of running the same concurrent deposits against both shared accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceOutcome {
    pub expected: Decimal,
    pub unsynchronized: Decimal,
    pub synchronized: Decimal,
}

impl RaceOutcome {
    pub fn lost_update(&self) -> bool {
        self.unsynchronized != self.expected
    }
}

/// Two deposits of `amount` raced against a [`RacyAccount`] and a [`SyncAccount`],
/// both opened with `balance` and using the same `latency`.
///
/// `expected` is the opening balance plus every deposit the racy account accepted.
/// Fails when `amount` is not positive, or when that total cannot be represented.
pub fn race(
    balance: Decimal,
    amount: Decimal,
    latency: Duration,
) -> Result<RaceOutcome, LedgerError> {
    const WORKERS: usize = 2;

    if amount <= Decimal::ZERO {
        return Err(LedgerError::NegativeAmount {
            kind: TransactionKind::Deposit,
            amount,
        });
    }

    let racy = RacyAccount::new("Racer", balance, latency);
    let accepted = concurrent_deposits(&racy, amount, WORKERS);
    let expected = accepted
        .iter()
        .filter_map(|result| result.as_ref().ok())
        .try_fold(balance, |total, report| total.checked_add(report.amount()))
        .ok_or(LedgerError::Overflow {
            kind: TransactionKind::Deposit,
            balance,
            amount,
        })?;

    let synced = SyncAccount::new(
        Account::new("Racer", balance, LedgerConfig::patched()),
        latency,
    );
    concurrent_deposits(&synced, amount, WORKERS);

    let outcome = RaceOutcome {
        expected,
        unsynchronized: racy.balance(),
        synchronized: synced.balance(),
    };
    log::info!(
        "[race] expected={} unsynchronized={} synchronized={}",
        outcome.expected,
        outcome.unsynchronized,
        outcome.synchronized
    );
    Ok(outcome)
}
