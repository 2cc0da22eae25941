//! Concurrent deposits against shared accounts.
//!
//! Both accounts sleep between reading and writing the balance. The racy account
//! releases its lock during the sleep, the synchronized one does not.
use bank_ledger::scenario::race;
use bank_ledger::{
    concurrent_deposits, Account, ConcurrentLedger, LedgerConfig, RacyAccount, SyncAccount,
};
use rust_decimal_macros::dec;
use std::time::Duration;

const LATENCY: Duration = Duration::from_millis(100);

#[test]
fn test_unsynchronized_deposits_lose_an_update() {
    let account = RacyAccount::new("Racer", dec!(1000), LATENCY);
    let results = concurrent_deposits(&account, dec!(100), 2);

    // Both workers succeed, and both read 1000 before either wrote
    assert!(results.iter().all(Result::is_ok));
    assert!(results
        .iter()
        .all(|r| r.as_ref().unwrap().balance_before() == dec!(1000)));
    assert_eq!(account.balance(), dec!(1100));
}

#[test]
fn test_synchronized_deposits_are_all_applied() {
    let account = SyncAccount::new(
        Account::new("Racer", dec!(1000), LedgerConfig::patched()),
        LATENCY,
    );
    let results = concurrent_deposits(&account, dec!(100), 2);

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(account.balance(), dec!(1200));
    assert_eq!(account.into_inner().transaction_history().len(), 2);
}

#[test]
fn test_synchronized_withdrawals_never_overdraw() {
    let account = SyncAccount::new(
        Account::new("Racer", dec!(100), LedgerConfig::patched()),
        Duration::from_millis(10),
    );

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..3)
            .map(|_| scope.spawn(|| account.withdraw(dec!(60))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(account.balance(), dec!(40));
}

#[test]
fn test_race_scenario_reports_lost_update() {
    let outcome = race(dec!(500), dec!(50), LATENCY).unwrap();

    assert_eq!(outcome.expected, dec!(600));
    assert_eq!(outcome.synchronized, dec!(600));
    assert_eq!(outcome.unsynchronized, dec!(550));
    assert!(outcome.lost_update());
}
