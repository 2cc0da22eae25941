//! Interactive menu loop driving a single account.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::ledger::{
    Account, Decimal, Error, Ledger, LedgerConfig, LedgerError, OperationReport, TransactionKind,
};
use crate::telemetry::{Instrumented, Observer};

const MENU: &str = "\n1. Deposit\n2. Withdraw\n3. Show Balance\n4. Exit";
const INVALID_INPUT: &str =
    "Error: Invalid input. Please enter numeric values for amounts and choices.";

/// A prompt/response session over any line-based input and any output.
///
/// Under the strict policy malformed numbers are reported and asked for again;
/// under the lenient policy they end the session with [`Error::InvalidInput`].
/// End of input is treated like choosing "Exit".
pub struct Session<R, W> {
    input: R,
    output: W,
    config: LedgerConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: LedgerConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Run the session to completion and return the account it operated on,
    /// or `None` if input ended before the account was opened.
    pub fn run<O: Observer>(mut self, observer: O) -> Result<Option<Account>, Error> {
        log::info!("Starting interactive session");

        let Some(owner) = self.prompt("Enter account owner's name: ")? else {
            return Ok(None);
        };
        let Some(initial_balance) = self.read_number::<Decimal>("Enter initial balance: ")? else {
            return Ok(None);
        };

        let mut account = Instrumented::open(owner, initial_balance, self.config, observer);
        if account.balance() != initial_balance {
            writeln!(
                self.output,
                "Warning: Initial balance cannot be negative. Setting to {}.",
                account.balance()
            )?;
        }

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.read_number::<u32>("Choose an option: ")? else {
                log::info!("Input closed, ending session");
                break;
            };

            match choice {
                1 => {
                    let Some(amount) = self.read_number("Enter amount to deposit: ")? else {
                        break;
                    };
                    let result = account.deposit(amount);
                    self.report(&result)?;
                }
                2 => {
                    let Some(amount) = self.read_number("Enter amount to withdraw: ")? else {
                        break;
                    };
                    let result = account.withdraw(amount);
                    self.report(&result)?;
                }
                3 => account.display_balance(&mut self.output)?,
                4 => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }

        let (account, _) = account.into_parts();
        log::info!("Session ended with balance {}", account.balance());
        Ok(Some(account))
    }

    /// Print `message` and read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_number<T: FromStr>(&mut self, message: &str) -> Result<Option<T>, Error> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) if self.config.is_strict() => {
                    log::debug!("Rejected non-numeric input {line:?}");
                    writeln!(self.output, "{INVALID_INPUT}")?;
                }
                Err(_) => return Err(Error::InvalidInput { input: line }),
            }
        }
    }

    fn report(&mut self, result: &Result<OperationReport, LedgerError>) -> Result<(), Error> {
        match result {
            Ok(report) => match report.rejection() {
                Some(rejection) => writeln!(self.output, "{}", diagnostic(rejection))?,
                None => {
                    let verb = match report.kind() {
                        TransactionKind::Deposit => "deposited",
                        TransactionKind::Withdraw => "withdrawn",
                    };
                    writeln!(self.output, "{} {verb} successfully!", report.amount())?;
                    if let (true, Some(threshold)) =
                        (report.is_low_balance(), self.config.low_balance_threshold)
                    {
                        writeln!(self.output, "Warning: Your balance is below {threshold}.")?;
                    }
                }
            },
            Err(e) => writeln!(self.output, "Error: {}", diagnostic(e))?,
        }
        Ok(())
    }
}

fn diagnostic(error: &LedgerError) -> String {
    match error {
        LedgerError::NegativeAmount { kind, amount } if amount.is_zero() => {
            format!("Cannot {kind} a zero amount.")
        }
        LedgerError::NegativeAmount { kind, .. } => format!("Cannot {kind} a negative amount."),
        LedgerError::InsufficientFunds { .. } => "Insufficient funds.".to_string(),
        LedgerError::Overflow { kind, .. } => {
            format!("Cannot {kind} that amount: the balance would overflow.")
        }
    }
}
