//! Integration tests for the account ledger.
//!
//! These tests exercise whole flows: scripted operation sequences, interactive
//! sessions from input text to transcript, and history export.
use bank_ledger::telemetry::{CollectingObserver, SpanName, Warning};
use bank_ledger::{
    Account, Error, ErrorKind, HistoryMode, Ledger, LedgerConfig, LedgerError, Session,
    TransactionKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

/// Helper to run an interactive session over `input` and capture its transcript
fn run_session(
    config: LedgerConfig,
    input: &str,
    observer: &CollectingObserver,
) -> (Result<Option<Account>, Error>, String) {
    let mut output = Vec::new();
    let result = Session::new(Cursor::new(input), &mut output, config).run(observer);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_reference_scenario_lenient() {
    let mut account = Account::new("Test User", dec!(1000), LedgerConfig::original());

    account.deposit(dec!(500)).unwrap();
    assert_eq!(account.balance(), dec!(1500));
    account.withdraw(dec!(200)).unwrap();
    assert_eq!(account.balance(), dec!(1300));

    let report = account.deposit(dec!(-50)).unwrap();
    assert!(!report.is_applied());
    assert_eq!(account.balance(), dec!(1300));

    let report = account.withdraw(dec!(5000)).unwrap();
    assert!(!report.is_applied());
    assert_eq!(account.balance(), dec!(1300));

    account.withdraw(dec!(100)).unwrap();
    assert_eq!(account.balance(), dec!(1200));
}

#[test]
fn test_reference_scenario_strict() {
    let mut account = Account::new("Test User", dec!(1000), LedgerConfig::patched());

    account.deposit(dec!(500)).unwrap();
    account.withdraw(dec!(200)).unwrap();
    assert_eq!(
        account.deposit(dec!(-50)).unwrap_err().kind(),
        ErrorKind::NegativeAmount
    );
    assert_eq!(
        account.withdraw(dec!(5000)),
        Err(LedgerError::InsufficientFunds {
            balance: dec!(1300),
            requested: dec!(5000)
        })
    );
    account.withdraw(dec!(100)).unwrap();
    assert_eq!(account.balance(), dec!(1200));

    let history = account.transaction_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0], (TransactionKind::Deposit, dec!(500)));
    assert_eq!(history[1], (TransactionKind::Withdraw, dec!(200)));
    assert_eq!(history[2], (TransactionKind::Withdraw, dec!(100)));
}

#[test]
fn test_copied_history_cannot_change_account() {
    let mut account = Account::new("Test User", dec!(100), LedgerConfig::patched());
    account.deposit(dec!(50)).unwrap();
    account.withdraw(dec!(30)).unwrap();

    let mut copy = account.transaction_history().into_owned();
    copy.reverse();
    copy.pop();

    let history = account.transaction_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], (TransactionKind::Deposit, dec!(50)));
}

#[test]
fn test_session_lenient_transcript() {
    let observer = CollectingObserver::new();
    let input = "Alice\n1000\n1\n500\n2\n200\n1\n-50\n2\n5000\n3\n4\n";
    let (result, output) = run_session(LedgerConfig::original(), input, &observer);

    let account = result.unwrap().unwrap();
    assert_eq!(account.owner(), "Alice");
    assert_eq!(account.balance(), dec!(1300));

    assert!(output.contains("500 deposited successfully!"));
    assert!(output.contains("200 withdrawn successfully!"));
    assert!(output.contains("Cannot deposit a negative amount."));
    assert!(output.contains("Insufficient funds."));
    assert!(output.contains("Account balance for Alice is: 1300"));
    assert!(output.ends_with("Exiting...\n"));

    let names: Vec<SpanName> = observer.spans().iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            SpanName::InitializeAccount,
            SpanName::Deposit,
            SpanName::Withdraw,
            SpanName::Deposit,
            SpanName::Withdraw,
            SpanName::DisplayBalance,
        ]
    );
}

#[test]
fn test_session_lenient_propagates_invalid_input() {
    let observer = CollectingObserver::new();
    let (result, _) = run_session(LedgerConfig::original(), "Alice\n100\n1\nabc\n", &observer);

    match result {
        Err(Error::InvalidInput { input }) => assert_eq!(input, "abc"),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn test_session_strict_reports_invalid_input_and_continues() {
    let observer = CollectingObserver::new();
    let input = "Bob\nlots\n100\nx\n1\nfifty\n50\n4\n";
    let (result, output) = run_session(LedgerConfig::patched(), input, &observer);

    let account = result.unwrap().unwrap();
    assert_eq!(account.balance(), dec!(150));
    assert_eq!(
        output
            .matches("Error: Invalid input. Please enter numeric values for amounts and choices.")
            .count(),
        3
    );
    assert!(output.contains("50 deposited successfully!"));
}

#[test]
fn test_session_strict_reports_ledger_errors() {
    let observer = CollectingObserver::new();
    let input = "Bob\n150\n1\n-5\n2\n500\n2\n60\n4\n";
    let (result, output) = run_session(LedgerConfig::patched(), input, &observer);

    assert_eq!(result.unwrap().unwrap().balance(), dec!(90));
    assert!(output.contains("Error: Cannot deposit a negative amount."));
    assert!(output.contains("Error: Insufficient funds."));
    assert!(output.contains("60 withdrawn successfully!"));
    assert!(output.contains("Warning: Your balance is below 100."));

    let spans = observer.spans();
    assert_eq!(spans.last().unwrap().warning, Some(Warning::LowBalance));
}

#[test]
fn test_session_ends_cleanly_at_end_of_input() {
    let observer = CollectingObserver::new();
    let (result, output) = run_session(LedgerConfig::original(), "Alice\n100\n1\n25\n", &observer);

    assert_eq!(result.unwrap().unwrap().balance(), dec!(125));
    assert!(!output.contains("Exiting..."));
}

#[test]
fn test_session_history_export() {
    let observer = CollectingObserver::new();
    let config = LedgerConfig::original().with_history(HistoryMode::Enabled);
    let (result, _) = run_session(config, "Alice\n0\n1\n10\n2\n4\n4\n", &observer);
    let account = result.unwrap().unwrap();

    let mut csv = Vec::new();
    account.export_history(&mut csv).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "kind,amount\ndeposit,10\nwithdraw,4\n"
    );
    assert_eq!(account.balance(), Decimal::from(6));
}

#[test]
fn test_strict_errors_propagate_with_question_mark() {
    fn overdraw(account: &mut Account) -> Result<(), Error> {
        account.deposit(dec!(10))?;
        account.withdraw(dec!(1000))?;
        Ok(())
    }

    let mut account = Account::new("Test User", dec!(100), LedgerConfig::patched());
    let err = overdraw(&mut account).unwrap_err();
    assert!(matches!(
        err,
        Error::Ledger(LedgerError::InsufficientFunds { .. })
    ));
    assert_eq!(account.balance(), dec!(110));
}
